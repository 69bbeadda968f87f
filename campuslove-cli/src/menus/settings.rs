use diesel::sqlite::SqliteConnection;

use campuslove_core::models::{UpdateProfile, User};
use campuslove_core::services::{auth_service, lookup_service, profile_service};

use crate::input;
use crate::menus::show_error;

/// Returns a refreshed `User` when something about the account changed.
pub fn run(conn: &mut SqliteConnection, user: &User) -> Option<User> {
    loop {
        println!("\n--- Settings ---");
        println!("1. Change slogan");
        println!("2. Change profession");
        println!("3. Change relationship status");
        println!("4. Change password");
        println!("0. Back");

        match input::read_text("\nselect an option: ").as_str() {
            "1" => {
                let slogan = input::read_text("new slogan: ");
                apply(conn, user, UpdateProfile {
                    slogan: Some(slogan),
                    ..Default::default()
                });
            }
            "2" => {
                if let Some(id) = pick_lookup(conn, "profession") {
                    apply(conn, user, UpdateProfile {
                        profession_id: Some(id),
                        ..Default::default()
                    });
                }
            }
            "3" => {
                if let Some(id) = pick_lookup(conn, "status") {
                    apply(conn, user, UpdateProfile {
                        status_id: Some(id),
                        ..Default::default()
                    });
                }
            }
            "4" => {
                if change_password(conn, user) {
                    return reload(conn, user);
                }
            }
            "0" | "" => return None,
            _ => println!("invalid option, try again"),
        }
    }
}

fn apply(conn: &mut SqliteConnection, user: &User, changes: UpdateProfile) {
    // Lookup references are validated before they hit the profile row.
    if let Some(id) = changes.profession_id {
        if let Err(err) = lookup_service::professions::get(conn, id) {
            show_error(&err);
            return;
        }
    }
    if let Some(id) = changes.status_id {
        if let Err(err) = lookup_service::statuses::get(conn, id) {
            show_error(&err);
            return;
        }
    }

    match profile_service::update_profile(conn, user.profile_id, changes) {
        Ok(_) => println!("profile updated"),
        Err(err) => show_error(&err),
    }
}

fn pick_lookup(conn: &mut SqliteConnection, label: &str) -> Option<i32> {
    let options = match label {
        "profession" => lookup_service::professions::list(conn),
        _ => lookup_service::statuses::list(conn),
    };
    let options = match options {
        Ok(options) => options,
        Err(err) => {
            show_error(&err);
            return None;
        }
    };

    println!("\navailable {label}s:");
    for option in &options {
        println!("  {} - {}", option.id, option.description);
    }
    match input::read_int(&format!("new {label} id (0 to cancel): ")) {
        0 => None,
        id => Some(id),
    }
}

fn change_password(conn: &mut SqliteConnection, user: &User) -> bool {
    let old_password = input::read_text("\ncurrent password: ");
    let new_password = input::read_text("new password: ");

    match auth_service::change_password(conn, user.id, &old_password, &new_password) {
        Ok(()) => {
            println!("password changed");
            true
        }
        Err(err) => {
            show_error(&err);
            false
        }
    }
}

fn reload(conn: &mut SqliteConnection, user: &User) -> Option<User> {
    auth_service::get_user(conn, user.id).ok()
}
