use diesel::sqlite::SqliteConnection;

use campuslove_core::services::stats_service;

use crate::input;
use crate::menus::show_error;

const TOP_INTERESTS: i32 = 5;

pub fn run(conn: &mut SqliteConnection) {
    println!("\n--- Statistics ---");

    match stats_service::user_with_most_likes(conn) {
        Ok(Some(leader)) => {
            println!("most active: {} ({} likes sent)", leader.username, leader.total_likes)
        }
        Ok(None) => println!("most active: no users yet"),
        Err(err) => show_error(&err),
    }

    match stats_service::user_with_fewest_likes(conn) {
        Ok(Some(leader)) => {
            println!("least active: {} ({} likes sent)", leader.username, leader.total_likes)
        }
        Ok(None) => println!("least active: no users yet"),
        Err(err) => show_error(&err),
    }

    match stats_service::most_popular_interests(conn, TOP_INTERESTS) {
        Ok(interests) if interests.is_empty() => println!("popular interests: none recorded"),
        Ok(interests) => {
            println!("popular interests:");
            for interest in interests {
                println!("  {} ({} profiles)", interest.description, interest.users_count);
            }
        }
        Err(err) => show_error(&err),
    }

    match stats_service::matches_by_gender(conn) {
        Ok(stats) if stats.is_empty() => println!("matches by gender: no matches yet"),
        Ok(stats) => {
            println!("matches by gender:");
            for row in stats {
                println!("  {}: {}", row.gender, row.match_count);
            }
        }
        Err(err) => show_error(&err),
    }

    input::pause();
}
