use diesel::sqlite::SqliteConnection;

use campuslove_core::models::User;
use campuslove_core::services::like_service;

use crate::input;
use crate::menus::{browse, chat, matches, purchase, settings, show_error};

pub fn run(conn: &mut SqliteConnection, mut user: User) {
    loop {
        let remaining = match like_service::remaining_likes(conn, user.id) {
            Ok(remaining) => remaining,
            Err(err) => {
                show_error(&err);
                return;
            }
        };

        println!("\n--- Hi {} (likes remaining: {remaining}) ---", user.username);
        println!("1. Browse profiles");
        println!("2. View matches");
        println!("3. Chat");
        println!("4. Buy likes");
        println!("5. Settings");
        println!("0. Log out");

        match input::read_text("\nselect an option: ").as_str() {
            "1" => browse::run(conn, &user),
            "2" => matches::run(conn, &user),
            "3" => chat::run(conn, &user),
            "4" => purchase::run(conn, &user),
            "5" => {
                // Settings can change the password hash; keep the session copy fresh.
                if let Some(updated) = settings::run(conn, &user) {
                    user = updated;
                }
            }
            "0" | "" => return,
            _ => println!("invalid option, try again"),
        }
    }
}
