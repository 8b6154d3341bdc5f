//! Database operations for profile `PostgreSQL`.
//!
//! # Database: `profile_registry`
//!
//! ## Tables
//!
//! - `profile` - Person or company registration (unique email, cpf, cnpj, cellphone)
//! - `address` - The profile's single postal address (1:1, owned)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p profile-registry-cli -- migrate
//! ```

pub mod profiles;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use profiles::{PgProfileStore, ProfileStore};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique constraint violation on the listed columns.
    ///
    /// The list is empty when the database did not say which column clashed.
    #[error("{}", conflict_message(.0))]
    Conflict(Vec<String>),
}

/// Render `email, cpf already taken`, or `field already taken` when unknown.
#[must_use]
pub fn conflict_message(fields: &[String]) -> String {
    if fields.is_empty() {
        "field already taken".to_string()
    } else {
        format!("{} already taken", fields.join(", "))
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
