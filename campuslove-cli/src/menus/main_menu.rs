use diesel::sqlite::SqliteConnection;

use campuslove_core::services::auth_service;

use crate::input;
use crate::menus::{admin, show_error, signup, user_menu};

pub fn run(conn: &mut SqliteConnection) {
    println!("=== CampusLove ===");

    loop {
        println!("\n--- Welcome ---");
        println!("1. Log in");
        println!("2. Sign up");
        println!("3. Administrator log in");
        println!("0. Exit");

        match input::read_text("\nselect an option: ").as_str() {
            "1" => log_in(conn),
            "2" => signup::run(conn),
            "3" => admin_log_in(conn),
            "0" | "" => {
                println!("goodbye!");
                return;
            }
            _ => println!("invalid option, try again"),
        }
    }
}

fn log_in(conn: &mut SqliteConnection) {
    let username = input::read_text("\nusername: ");
    let password = input::read_text("password: ");

    match auth_service::login(conn, &username, &password) {
        Ok(user) => user_menu::run(conn, user),
        Err(err) => show_error(&err),
    }
}

fn admin_log_in(conn: &mut SqliteConnection) {
    let username = input::read_text("\nadmin username: ");
    let password = input::read_text("admin password: ");

    match auth_service::admin_login(conn, &username, &password) {
        Ok(admin_account) => admin::run(conn, &admin_account),
        Err(err) => show_error(&err),
    }
}
