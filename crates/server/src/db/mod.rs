//! Database operations for the Atelier `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `users` - Storefront accounts (admins are flagged users)
//! - `session` - tower-sessions storage
//! - `categories`, `products` - Catalog
//! - `blank_products` - Design-studio blanks (views/zones as JSONB)
//! - `orders`, `design_orders` - Order records
//! - `saved_carts`, `saved_wishlists` - Authenticated-tier collections
//! - `subscribers`, `site_settings` - Newsletter and store settings
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p atelier-cli -- migrate
//! ```

pub mod blank_products;
pub mod categories;
pub mod design_orders;
pub mod orders;
pub mod products;
pub mod saved_collections;
pub mod settings;
pub mod subscribers;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique-constraint violations into
    /// [`RepositoryError::Conflict`].
    pub(crate) fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(db_err.message().to_string());
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
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
