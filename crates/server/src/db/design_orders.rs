//! Design order repository.
//!
//! A design order is a customized blank: which blank, which variant, and
//! the layer stack the customer placed in the studio. Layers are stored
//! verbatim as JSONB; the server never renders them.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use atelier_core::{BlankProductId, DesignLayer, DesignOrderId, DesignOrderStatus, UserId};

use super::RepositoryError;

/// A design-studio order (domain type).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignOrder {
    pub id: DesignOrderId,
    /// Stable reference shared with the customer (order confirmation).
    pub public_ref: Uuid,
    pub user_id: UserId,
    pub blank_product_id: BlankProductId,
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    pub quantity: u32,
    pub layers: Vec<DesignLayer>,
    pub unit_price: Decimal,
    pub status: DesignOrderStatus,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when submitting a design order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignOrderInput {
    pub blank_product_id: BlankProductId,
    #[serde(default)]
    pub selected_size: Option<String>,
    #[serde(default)]
    pub selected_color: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub layers: Vec<DesignLayer>,
    #[serde(default)]
    pub note: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

#[derive(sqlx::FromRow)]
struct DesignOrderRow {
    id: i32,
    public_ref: Uuid,
    user_id: i32,
    blank_product_id: i32,
    selected_size: Option<String>,
    selected_color: Option<String>,
    quantity: i32,
    layers: Json<Vec<DesignLayer>>,
    unit_price: Decimal,
    status: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DesignOrderRow {
    fn into_domain(self) -> Result<DesignOrder, RepositoryError> {
        let status = DesignOrderStatus::from_str(&self.status)
            .map_err(RepositoryError::DataCorruption)?;
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!("negative quantity: {}", self.quantity))
        })?;
        Ok(DesignOrder {
            id: DesignOrderId::new(self.id),
            public_ref: self.public_ref,
            user_id: UserId::new(self.user_id),
            blank_product_id: BlankProductId::new(self.blank_product_id),
            selected_size: self.selected_size,
            selected_color: self.selected_color,
            quantity,
            layers: self.layers.0,
            unit_price: self.unit_price,
            status,
            note: self.note,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, public_ref, user_id, blank_product_id, selected_size, \
     selected_color, quantity, layers, unit_price, status, note, created_at, updated_at";

/// Repository for design order database operations.
pub struct DesignOrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DesignOrderRepository<'a> {
    /// Create a new design order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Submit a design order. The unit price is the blank's base price at
    /// submission time, frozen on the order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        user_id: UserId,
        input: &DesignOrderInput,
        unit_price: Decimal,
    ) -> Result<DesignOrder, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO design_orders
                (public_ref, user_id, blank_product_id, selected_size, selected_color,
                 quantity, layers, unit_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'submitted')
            RETURNING {SELECT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, DesignOrderRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(input.blank_product_id)
            .bind(&input.selected_size)
            .bind(&input.selected_color)
            .bind(i32::try_from(input.quantity).unwrap_or(1))
            .bind(Json(&input.layers))
            .bind(unit_price)
            .fetch_one(self.pool)
            .await?;

        row.into_domain()
    }

    /// List a user's design orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DesignOrder>, RepositoryError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM design_orders WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, DesignOrderRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(DesignOrderRow::into_domain).collect()
    }

    /// List all design orders, newest first (admin screen).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<DesignOrder>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM design_orders ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, DesignOrderRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(DesignOrderRow::into_domain).collect()
    }

    /// Update a design order's status (admin action).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn set_status(
        &self,
        id: DesignOrderId,
        status: DesignOrderStatus,
    ) -> Result<DesignOrder, RepositoryError> {
        let sql = format!(
            r"
            UPDATE design_orders SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, DesignOrderRow>(&sql)
            .bind(id)
            .bind(status.to_string())
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        row.into_domain()
    }
}
