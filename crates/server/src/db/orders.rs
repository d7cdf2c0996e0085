//! Order repository.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use sqlx::types::Json;

use atelier_core::{CartLine, OrderId, OrderStatus, UserId};

use super::RepositoryError;

/// A checkout-adjacent order record (domain type).
///
/// Payment capture happens out of band; this record is the storefront's
/// view of what was ordered and where it ships.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
    pub status: OrderStatus,
    pub shipping_name: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shipping details captured at order creation.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: String,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    lines: Json<Vec<CartLine>>,
    subtotal: Decimal,
    status: String,
    shipping_name: String,
    shipping_address: String,
    shipping_city: String,
    shipping_phone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_domain(self) -> Result<Order, RepositoryError> {
        let status = OrderStatus::from_str(&self.status)
            .map_err(RepositoryError::DataCorruption)?;
        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            lines: self.lines.0,
            subtotal: self.subtotal,
            status,
            shipping_name: self.shipping_name,
            shipping_address: self.shipping_address,
            shipping_city: self.shipping_city,
            shipping_phone: self.shipping_phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, user_id, lines, subtotal, status, shipping_name, \
     shipping_address, shipping_city, shipping_phone, created_at, updated_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        user_id: UserId,
        lines: &[CartLine],
        subtotal: Decimal,
        shipping: &ShippingDetails,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            r"
            INSERT INTO orders
                (user_id, lines, subtotal, shipping_name, shipping_address,
                 shipping_city, shipping_phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SELECT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(user_id)
            .bind(Json(lines))
            .bind(subtotal)
            .bind(&shipping.name)
            .bind(&shipping.address)
            .bind(&shipping.city)
            .bind(&shipping.phone)
            .fetch_one(self.pool)
            .await?;

        row.into_domain()
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    /// List all orders, newest first (admin screen).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM orders ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    /// Get one order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM orders WHERE id = $1");
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(OrderRow::into_domain).transpose()
    }

    /// Update an order's status (admin action).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let sql = format!(
            r"
            UPDATE orders SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "
        );
        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .bind(status.to_string())
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        row.into_domain()
    }
}
