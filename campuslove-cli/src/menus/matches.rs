use diesel::sqlite::SqliteConnection;

use campuslove_core::models::User;
use campuslove_core::services::match_service::{self, MatchSummary};

use crate::input;
use crate::menus::show_error;

const RECENT_LIMIT: usize = 5;

pub fn run(conn: &mut SqliteConnection, user: &User) {
    loop {
        println!("\n--- Your matches ---");
        println!("1. View all matches");
        println!("2. View recent matches");
        println!("0. Back");

        let result = match input::read_text("\nselect an option: ").as_str() {
            "1" => match_service::matches_for(conn, user.id),
            "2" => match_service::recent_matches_for(conn, user.id, RECENT_LIMIT),
            "0" | "" => return,
            _ => {
                println!("invalid option, try again");
                continue;
            }
        };

        match result {
            Ok(summaries) => print_summaries(&summaries),
            Err(err) => show_error(&err),
        }
        input::pause();
    }
}

fn print_summaries(summaries: &[MatchSummary]) {
    if summaries.is_empty() {
        println!("\nno matches yet, keep browsing!");
        return;
    }

    println!("\ntotal matches: {}", summaries.len());
    for summary in summaries {
        println!(
            "  {} ({}) - matched on {}",
            summary.other_full_name,
            summary.other_username,
            summary.match_date.format("%Y-%m-%d %H:%M")
        );
    }
}
