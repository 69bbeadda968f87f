use diesel::sqlite::SqliteConnection;

use campuslove_core::models::User;
use campuslove_core::services::like_service;

use crate::input;
use crate::menus::show_error;

/// (label, likes credited) for each package. Prices are cosmetic: the
/// payment is simulated end to end.
const PACKAGES: [(&str, i32); 3] = [
    ("5 likes - $1.00", 5),
    ("10 likes - $1.80", 10),
    ("20 likes - $3.00", 20),
];

pub fn run(conn: &mut SqliteConnection, user: &User) {
    println!("\n--- Buy likes ---");
    for (index, (label, _)) in PACKAGES.iter().enumerate() {
        println!("{}. {label}", index + 1);
    }
    println!("0. Back");

    let choice = input::read_int("\nselect a package: ");
    if choice <= 0 || choice as usize > PACKAGES.len() {
        return;
    }
    let (_, amount) = PACKAGES[choice as usize - 1];

    let card_number = input::read_text("\ncard number: ");
    println!("detected: {}", card_type(&card_number));

    if !input::confirm("simulate payment? (y/n): ") {
        println!("purchase cancelled");
        return;
    }
    println!("processing payment... done");

    match like_service::purchase_bonus_likes(conn, user.id, amount) {
        Ok(balance) => println!("purchase successful! +{amount} bonus likes (balance: {balance})"),
        Err(err) => show_error(&err),
    }
}

fn card_type(number: &str) -> &'static str {
    if number.starts_with("34") || number.starts_with("37") {
        "American Express"
    } else if number.starts_with('4') {
        "Visa"
    } else if number.starts_with('5') {
        "MasterCard"
    } else if number.starts_with('6') {
        "Discover"
    } else {
        "Unknown card"
    }
}
