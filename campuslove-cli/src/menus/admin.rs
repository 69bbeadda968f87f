use diesel::sqlite::SqliteConnection;

use campuslove_core::errors::AppResult;
use campuslove_core::models::{Administrator, Lookup};
use campuslove_core::services::lookup_service;

use crate::input;
use crate::menus::{show_error, stats};

/// One set of screens drives all four lookup tables; the table-specific
/// queries come in as plain function pointers.
struct LookupScreen {
    label: &'static str,
    list: fn(&mut SqliteConnection) -> AppResult<Vec<Lookup>>,
    create: fn(&mut SqliteConnection, &str) -> AppResult<Lookup>,
    rename: fn(&mut SqliteConnection, i32, &str) -> AppResult<Lookup>,
    delete: fn(&mut SqliteConnection, i32) -> AppResult<()>,
}

const SCREENS: [LookupScreen; 4] = [
    LookupScreen {
        label: "genders",
        list: lookup_service::genders::list,
        create: lookup_service::genders::create,
        rename: lookup_service::genders::rename,
        delete: lookup_service::genders::delete,
    },
    LookupScreen {
        label: "interests",
        list: lookup_service::interests::list,
        create: lookup_service::interests::create,
        rename: lookup_service::interests::rename,
        delete: lookup_service::interests::delete,
    },
    LookupScreen {
        label: "professions",
        list: lookup_service::professions::list,
        create: lookup_service::professions::create,
        rename: lookup_service::professions::rename,
        delete: lookup_service::professions::delete,
    },
    LookupScreen {
        label: "statuses",
        list: lookup_service::statuses::list,
        create: lookup_service::statuses::create,
        rename: lookup_service::statuses::rename,
        delete: lookup_service::statuses::delete,
    },
];

pub fn run(conn: &mut SqliteConnection, admin_account: &Administrator) {
    loop {
        println!("\n--- Administration ({}) ---", admin_account.username);
        for (index, screen) in SCREENS.iter().enumerate() {
            println!("{}. Manage {}", index + 1, screen.label);
        }
        println!("5. Statistics");
        println!("0. Back");

        match input::read_text("\nselect an option: ").as_str() {
            "1" => lookup_menu(conn, &SCREENS[0]),
            "2" => lookup_menu(conn, &SCREENS[1]),
            "3" => lookup_menu(conn, &SCREENS[2]),
            "4" => lookup_menu(conn, &SCREENS[3]),
            "5" => stats::run(conn),
            "0" | "" => return,
            _ => println!("invalid option, try again"),
        }
    }
}

fn lookup_menu(conn: &mut SqliteConnection, screen: &LookupScreen) {
    loop {
        println!("\n--- {} ---", screen.label);
        match (screen.list)(conn) {
            Ok(rows) => {
                for row in rows {
                    println!("  {} - {}", row.id, row.description);
                }
            }
            Err(err) => show_error(&err),
        }

        println!("\n1. Add  2. Rename  3. Delete  0. Back");
        match input::read_text("select an option: ").as_str() {
            "1" => {
                let description = input::read_text("description: ");
                match (screen.create)(conn, &description) {
                    Ok(row) => println!("created {} with id {}", row.description, row.id),
                    Err(err) => show_error(&err),
                }
            }
            "2" => {
                let id = input::read_int("id to rename: ");
                let description = input::read_text("new description: ");
                match (screen.rename)(conn, id, &description) {
                    Ok(row) => println!("renamed to {}", row.description),
                    Err(err) => show_error(&err),
                }
            }
            "3" => {
                let id = input::read_int("id to delete: ");
                if !input::confirm("are you sure? (y/n): ") {
                    continue;
                }
                match (screen.delete)(conn, id) {
                    Ok(()) => println!("deleted"),
                    Err(err) => show_error(&err),
                }
            }
            "0" | "" => return,
            _ => println!("invalid option, try again"),
        }
    }
}
