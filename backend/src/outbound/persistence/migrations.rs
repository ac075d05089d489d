//! Embedded schema migrations.
//!
//! Migrations are compiled into the binary from `backend/migrations` and
//! applied over a short-lived synchronous connection on a blocking thread.

use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

fn run_blocking(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| {
        MigrationError::Connection {
            message: err.to_string(),
        }
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Apply every pending migration to `database_url`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the connection or any migration fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&url))
        .await
        .map_err(|err| MigrationError::Apply {
            message: format!("migration task failed: {err}"),
        })??;
    info!(applied, "database migrations complete");
    Ok(())
}
