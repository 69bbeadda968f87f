use diesel::sqlite::SqliteConnection;

use campuslove_core::models::User;
use campuslove_core::services::{match_service, message_service};

use crate::input;
use crate::menus::show_error;

pub fn run(conn: &mut SqliteConnection, user: &User) {
    let summaries = match match_service::matches_for(conn, user.id) {
        Ok(summaries) => summaries,
        Err(err) => {
            show_error(&err);
            return;
        }
    };
    if summaries.is_empty() {
        println!("\nyou need a match before you can chat");
        return;
    }

    println!("\n--- Chat ---");
    for (index, summary) in summaries.iter().enumerate() {
        println!("{}. {} ({})", index + 1, summary.other_full_name, summary.other_username);
    }
    println!("0. Back");

    let choice = input::read_int("\nchat with: ");
    if choice <= 0 || choice as usize > summaries.len() {
        return;
    }
    let partner = &summaries[choice as usize - 1];

    loop {
        match message_service::conversation(conn, user.id, partner.other_user_id) {
            Ok(thread) => {
                println!("\n--- conversation with {} ---", partner.other_username);
                if thread.is_empty() {
                    println!("(no messages yet, say hi!)");
                }
                for message in thread {
                    let who = if message.sender_id == user.id {
                        "you"
                    } else {
                        partner.other_username.as_str()
                    };
                    println!("[{}] {who}: {}", message.sent_at.format("%H:%M"), message.body);
                }
            }
            Err(err) => {
                show_error(&err);
                return;
            }
        }

        let body = input::read_text("\nmessage (empty to go back): ");
        if body.is_empty() {
            return;
        }
        if let Err(err) = message_service::send_message(conn, user.id, partner.other_user_id, &body)
        {
            show_error(&err);
        }
    }
}
