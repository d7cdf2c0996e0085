//! Product repository and catalog domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;

use atelier_core::{CategoryId, ProductId};

use super::RepositoryError;

/// A catalog product (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub currency: String,
    /// Display form of the price, e.g. "199.00 MAD". This is the string
    /// cart lines and wishlist entries carry.
    pub price_display: String,
    pub image_ref: String,
    pub gallery: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub category_id: Option<CategoryId>,
    pub featured: bool,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating or replacing a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub image_ref: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

fn default_currency() -> String {
    "MAD".to_string()
}

const fn default_true() -> bool {
    true
}

/// Filters for catalog listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub featured_only: bool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    title: String,
    description: String,
    price: Decimal,
    currency: String,
    image_ref: String,
    gallery: Json<Vec<String>>,
    sizes: Json<Vec<String>>,
    colors: Json<Vec<String>>,
    category_id: Option<i32>,
    featured: bool,
    in_stock: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let price_display = if row.currency == "MAD" {
            format!("{:.2} MAD", row.price)
        } else {
            format!("{} {:.2}", row.currency, row.price)
        };
        Self {
            id: ProductId::new(row.id),
            title: row.title,
            description: row.description,
            price: row.price,
            currency: row.currency,
            price_display,
            image_ref: row.image_ref,
            gallery: row.gallery.0,
            sizes: row.sizes.0,
            colors: row.colors.0,
            category_id: row.category_id.map(CategoryId::new),
            featured: row.featured,
            in_stock: row.in_stock,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, title, description, price, currency, image_ref, gallery, \
     sizes, colors, category_id, featured, in_stock, created_at, updated_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally filtered by category and featured flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            r"
            SELECT {SELECT_COLUMNS} FROM products
            WHERE ($1::int IS NULL OR category_id = $1)
              AND (NOT $2 OR featured)
            ORDER BY created_at DESC
            "
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(filter.category_id.map(|c| c.as_i32()))
            .bind(filter.featured_only)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Get several products at once, preserving no particular order.
    ///
    /// Used to populate wishlist entries from stored product refs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let raw_ids: Vec<i32> = ids.iter().map(ProductId::as_i32).collect();
        let sql = format!("SELECT {SELECT_COLUMNS} FROM products WHERE id = ANY($1)");
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&raw_ids)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO products
                (title, description, price, currency, image_ref, gallery, sizes, colors,
                 category_id, featured, in_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {SELECT_COLUMNS}
            "
        );
        let row = Self::bind_input(sqlx::query_as::<_, ProductRow>(&sql), input)
            .fetch_one(self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        Ok(row.into())
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn update(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            r"
            UPDATE products SET
                title = $1, description = $2, price = $3, currency = $4, image_ref = $5,
                gallery = $6, sizes = $7, colors = $8, category_id = $9, featured = $10,
                in_stock = $11, updated_at = NOW()
            WHERE id = $12
            RETURNING {SELECT_COLUMNS}
            "
        );
        let row = Self::bind_input(sqlx::query_as::<_, ProductRow>(&sql), input)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn bind_input<'q>(
        query: sqlx::query::QueryAs<'q, sqlx::Postgres, ProductRow, sqlx::postgres::PgArguments>,
        input: &'q ProductInput,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, ProductRow, sqlx::postgres::PgArguments> {
        query
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.image_ref)
            .bind(Json(&input.gallery))
            .bind(Json(&input.sizes))
            .bind(Json(&input.colors))
            .bind(input.category_id.map(|c| c.as_i32()))
            .bind(input.featured)
            .bind(input.in_stock)
    }
}
