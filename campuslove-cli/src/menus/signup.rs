use diesel::sqlite::SqliteConnection;

use campuslove_core::errors::AppResult;
use campuslove_core::models::Lookup;
use campuslove_core::services::auth_service::{self, RegisterRequest};
use campuslove_core::services::lookup_service;

use crate::input;
use crate::menus::show_error;

pub fn run(conn: &mut SqliteConnection) {
    println!("\n--- Sign up ---");

    let name = input::read_text("name: ");
    let last_name = input::read_text("last name: ");
    let identification = input::read_text("identification: ");
    let slogan = input::read_text("slogan: ");

    let gender_id = match pick(conn, "gender", lookup_service::genders::list) {
        Some(id) => id,
        None => return,
    };
    let profession_id = match pick(conn, "profession", lookup_service::professions::list) {
        Some(id) => id,
        None => return,
    };
    let status_id = match pick(conn, "relationship status", lookup_service::statuses::list) {
        Some(id) => id,
        None => return,
    };
    let interest_ids = pick_interests(conn);

    let username = input::read_text("\nusername: ");
    let password = input::read_text("password (8+ chars, letters and numbers): ");
    let birthdate = match input::read_date("birthdate (DD/MM/YYYY): ") {
        Some(date) => date,
        None => {
            println!("registration cancelled");
            return;
        }
    };

    if !input::confirm("\nregister this account? (y/n): ") {
        println!("registration cancelled");
        return;
    }

    let request = RegisterRequest {
        username,
        password,
        birthdate,
        name,
        last_name,
        identification,
        slogan,
        gender_id,
        profession_id,
        status_id,
        interest_ids,
    };

    match auth_service::register(conn, request) {
        Ok(user) => println!("\nwelcome aboard, {}! you can log in now.", user.username),
        Err(err) => show_error(&err),
    }
}

fn pick(
    conn: &mut SqliteConnection,
    label: &str,
    list: fn(&mut SqliteConnection) -> AppResult<Vec<Lookup>>,
) -> Option<i32> {
    let options = match list(conn) {
        Ok(options) => options,
        Err(err) => {
            show_error(&err);
            return None;
        }
    };
    if options.is_empty() {
        println!("no {label} options available, ask an administrator to add some");
        return None;
    }

    println!("\navailable {label}s:");
    for option in &options {
        println!("  {} - {}", option.id, option.description);
    }
    Some(input::read_int(&format!("select a {label} id: ")))
}

fn pick_interests(conn: &mut SqliteConnection) -> Vec<i32> {
    let options = match lookup_service::interests::list(conn) {
        Ok(options) => options,
        Err(err) => {
            show_error(&err);
            return Vec::new();
        }
    };

    println!("\navailable interests:");
    for option in &options {
        println!("  {} - {}", option.id, option.description);
    }
    println!("enter interest ids one at a time, 0 to finish");

    let mut picked = Vec::new();
    loop {
        let id = input::read_int("interest id: ");
        if id == 0 {
            return picked;
        }
        picked.push(id);
    }
}
