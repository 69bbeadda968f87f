use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Opens the database and brings the schema up to date.
///
/// One connection is enough here: a single interactive session drives all
/// operations sequentially, so the handle is passed down into each service
/// call instead of living in process-wide shared state.
pub fn connect(database_url: &str) -> AppResult<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)
        .map_err(|e| AppError::internal(format!("cannot open database {database_url}: {e}")))?;

    // SQLite does not enforce REFERENCES clauses unless asked to.
    conn.batch_execute("PRAGMA foreign_keys = ON;")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| AppError::internal(format!("migration failed: {e}")))?;

    tracing::info!(database = %database_url, "database ready");
    Ok(conn)
}

/// In-memory database with the full schema, for tests.
#[cfg(test)]
pub(crate) fn connect_in_memory() -> SqliteConnection {
    connect(":memory:").expect("in-memory database")
}
