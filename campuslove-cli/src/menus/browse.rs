use diesel::sqlite::SqliteConnection;

use campuslove_core::errors::{AppError, ErrorCode};
use campuslove_core::models::User;
use campuslove_core::services::{like_service, lookup_service, profile_service};

use crate::input;
use crate::menus::show_error;

pub fn run(conn: &mut SqliteConnection, user: &User) {
    let preferred_gender_id = select_gender_preference(conn);

    let cards = match profile_service::browse_candidates(conn, user, preferred_gender_id) {
        Ok(cards) => cards,
        Err(err) => {
            show_error(&err);
            return;
        }
    };
    if cards.is_empty() {
        println!("\nno profiles match your preferences yet");
        return;
    }
    println!("\nfound {} profiles", cards.len());

    for card in cards {
        println!("\n-----------------------------");
        println!("{}", card.profile.full_name());
        println!("\"{}\"", card.profile.slogan);
        println!(
            "{} | {} | {}",
            card.gender, card.profession, card.status
        );
        if card.interests.is_empty() {
            println!("interests: none listed");
        } else {
            println!("interests: {}", card.interests.join(", "));
        }
        println!("total likes received: {}", card.profile.total_likes);
        println!("-----------------------------");

        println!("1. Like  2. Dislike  3. Skip  0. Back");
        match input::read_text("your call: ").as_str() {
            "1" => like(conn, user, card.profile.id),
            "2" => dislike(conn, user, card.profile.id),
            "3" => continue,
            "0" | "" => return,
            _ => println!("invalid option, skipping"),
        }
    }

    println!("\nno more profiles to show");
}

fn select_gender_preference(conn: &mut SqliteConnection) -> Option<i32> {
    let genders = match lookup_service::genders::list(conn) {
        Ok(genders) => genders,
        Err(err) => {
            show_error(&err);
            return None;
        }
    };

    println!("\ngender preference:");
    println!("  0 - everyone");
    for gender in &genders {
        println!("  {} - {}", gender.id, gender.description);
    }

    match input::read_int("preferred gender id: ") {
        0 => None,
        id => Some(id),
    }
}

fn like(conn: &mut SqliteConnection, user: &User, profile_id: i32) {
    match like_service::record_like(conn, user.id, profile_id) {
        Ok(true) => println!("MATCH! you liked each other"),
        Ok(false) => println!("like sent"),
        Err(err @ AppError::Known { code: ErrorCode::QuotaExceeded, .. }) => {
            show_error(&err);
            println!("tip: the Buy likes menu refills your allowance");
        }
        Err(err) => show_error(&err),
    }
}

fn dislike(conn: &mut SqliteConnection, user: &User, profile_id: i32) {
    match like_service::record_dislike(conn, user.id, profile_id) {
        Ok(()) => println!("noted, you won't match with this profile"),
        Err(err) => show_error(&err),
    }
}
