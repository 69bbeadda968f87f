use std::io::{self, Write};

use chrono::NaiveDate;

/// Reads a trimmed line; an empty string on EOF so every menu falls through
/// to its "back" option.
pub fn read_text(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf).is_err() {
        return String::new();
    }
    buf.trim().to_owned()
}

pub fn read_int(prompt: &str) -> i32 {
    loop {
        let text = read_text(prompt);
        if text.is_empty() {
            return 0;
        }
        match text.parse() {
            Ok(value) => return value,
            Err(_) => println!("please enter a number"),
        }
    }
}

/// `None` when the prompt is left empty, so callers can treat it as a cancel.
pub fn read_date(prompt: &str) -> Option<NaiveDate> {
    loop {
        let text = read_text(prompt);
        if text.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(&text, "%d/%m/%Y") {
            Ok(date) => return Some(date),
            Err(_) => println!("please use DD/MM/YYYY"),
        }
    }
}

pub fn confirm(prompt: &str) -> bool {
    matches!(
        read_text(prompt).to_lowercase().as_str(),
        "y" | "yes"
    )
}

pub fn pause() {
    let _ = read_text("\npress enter to continue...");
}
