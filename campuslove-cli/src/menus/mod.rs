use campuslove_core::errors::AppError;

pub mod admin;
pub mod browse;
pub mod chat;
pub mod main_menu;
pub mod matches;
pub mod purchase;
pub mod settings;
pub mod signup;
pub mod stats;
pub mod user_menu;

/// Errors never end the session; they are shown and the menu prompts again.
pub fn show_error(err: &AppError) {
    println!("\n[{}] {}", err.code(), err.user_message());
}
