//! Site settings storage.
//!
//! A single JSONB document holds store-wide settings (store name, contact
//! details, announcement banner, social links). The shape is owned by the
//! admin UI; the server treats it as opaque JSON.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use super::RepositoryError;

/// Get the site settings document.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn get_settings(pool: &PgPool) -> Result<JsonValue, RepositoryError> {
    let row: Option<(JsonValue,)> =
        sqlx::query_as("SELECT data FROM site_settings WHERE id = 1")
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(data,)| data).unwrap_or_else(|| JsonValue::Object(serde_json::Map::new())))
}

/// Replace the site settings document.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn put_settings(pool: &PgPool, data: &JsonValue) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO site_settings (id, data)
        VALUES (1, $1)
        ON CONFLICT (id) DO UPDATE SET data = $1, updated_at = NOW()
        ",
    )
    .bind(data)
    .execute(pool)
    .await?;

    Ok(())
}
