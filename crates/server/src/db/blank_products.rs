//! Blank product repository.
//!
//! Blanks are the customizable garments offered in the design studio.
//! Their mockup views (and each view's print zones) are stored as one
//! JSONB document using the schema types from `atelier-core`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;

use atelier_core::{BlankProductId, MockupView};

use super::RepositoryError;

/// A blank product (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlankProduct {
    pub id: BlankProductId,
    pub name: String,
    pub description: String,
    pub base_price: Decimal,
    pub currency: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub views: Vec<MockupView>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlankProduct {
    /// Does a (view, zone) pair exist on this blank?
    #[must_use]
    pub fn has_zone(&self, view: &str, zone: &str) -> bool {
        self.views
            .iter()
            .any(|v| v.name == view && v.zones.iter().any(|z| z.name == zone))
    }
}

/// Fields accepted when creating or replacing a blank product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlankProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub views: Vec<MockupView>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_currency() -> String {
    "MAD".to_string()
}

const fn default_true() -> bool {
    true
}

#[derive(sqlx::FromRow)]
struct BlankRow {
    id: i32,
    name: String,
    description: String,
    base_price: Decimal,
    currency: String,
    sizes: Json<Vec<String>>,
    colors: Json<Vec<String>>,
    views: Json<Vec<MockupView>>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BlankRow> for BlankProduct {
    fn from(row: BlankRow) -> Self {
        Self {
            id: BlankProductId::new(row.id),
            name: row.name,
            description: row.description,
            base_price: row.base_price,
            currency: row.currency,
            sizes: row.sizes.0,
            colors: row.colors.0,
            views: row.views.0,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, name, description, base_price, currency, sizes, colors, \
     views, active, created_at, updated_at";

/// Repository for blank product database operations.
pub struct BlankProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BlankProductRepository<'a> {
    /// Create a new blank product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List blanks. The public studio sees only active ones; admin sees all.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<BlankProduct>, RepositoryError> {
        let sql = format!(
            r"
            SELECT {SELECT_COLUMNS} FROM blank_products
            WHERE $1 OR active
            ORDER BY name
            "
        );
        let rows = sqlx::query_as::<_, BlankRow>(&sql)
            .bind(include_inactive)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(BlankProduct::from).collect())
    }

    /// Get a blank by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: BlankProductId) -> Result<Option<BlankProduct>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM blank_products WHERE id = $1");
        let row = sqlx::query_as::<_, BlankRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(BlankProduct::from))
    }

    /// Create a blank.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &BlankProductInput) -> Result<BlankProduct, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO blank_products
                (name, description, base_price, currency, sizes, colors, views, active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SELECT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, BlankRow>(&sql)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.base_price)
            .bind(&input.currency)
            .bind(Json(&input.sizes))
            .bind(Json(&input.colors))
            .bind(Json(&input.views))
            .bind(input.active)
            .fetch_one(self.pool)
            .await?;

        Ok(row.into())
    }

    /// Replace a blank's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the blank doesn't exist.
    pub async fn update(
        &self,
        id: BlankProductId,
        input: &BlankProductInput,
    ) -> Result<BlankProduct, RepositoryError> {
        let sql = format!(
            r"
            UPDATE blank_products SET
                name = $2, description = $3, base_price = $4, currency = $5,
                sizes = $6, colors = $7, views = $8, active = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, BlankRow>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.base_price)
            .bind(&input.currency)
            .bind(Json(&input.sizes))
            .bind(Json(&input.colors))
            .bind(Json(&input.views))
            .bind(input.active)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a blank.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the blank doesn't exist.
    pub async fn delete(&self, id: BlankProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM blank_products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
