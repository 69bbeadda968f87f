use anyhow::Result;
use tracing_subscriber::EnvFilter;

use campuslove_core::config::AppConfig;
use campuslove_core::db;
use campuslove_core::services::auth_service;

mod input;
mod menus;

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,campuslove_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()?;
    let mut conn = db::connect(&config.database_url)?;
    auth_service::ensure_default_admin(&mut conn, &config.admin_username, &config.admin_password)?;

    tracing::info!("campuslove starting");
    menus::main_menu::run(&mut conn);
    Ok(())
}
