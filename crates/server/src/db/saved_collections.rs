//! Authenticated-tier cart and wishlist storage.
//!
//! One row per user for each collection. The cart stores full lines; the
//! wishlist stores product refs only and is populated from the catalog
//! when fetched.

use sqlx::PgPool;
use sqlx::types::Json;

use atelier_core::{CartLine, ProductId, UserId};

use super::RepositoryError;

/// Repository for per-user cart and wishlist records.
pub struct SavedCollectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SavedCollectionRepository<'a> {
    /// Create a new saved-collection repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Get the user's cart lines. A user with no cart row has an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_cart(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let row: Option<(Json<Vec<CartLine>>,)> =
            sqlx::query_as("SELECT lines FROM saved_carts WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(|(lines,)| lines.0).unwrap_or_default())
    }

    /// Replace the user's cart with `lines` (upsert).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn replace_cart(
        &self,
        user_id: UserId,
        lines: &[CartLine],
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO saved_carts (user_id, lines)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET lines = $2, updated_at = NOW()
            ",
        )
        .bind(user_id)
        .bind(Json(lines))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Get the user's wishlist product refs, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_wishlist_refs(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ProductId>, RepositoryError> {
        let row: Option<(Json<Vec<ProductId>>,)> =
            sqlx::query_as("SELECT product_ids FROM saved_wishlists WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(|(ids,)| ids.0).unwrap_or_default())
    }

    /// Replace the user's wishlist refs (upsert).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn replace_wishlist_refs(
        &self,
        user_id: UserId,
        product_ids: &[ProductId],
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO saved_wishlists (user_id, product_ids)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET product_ids = $2, updated_at = NOW()
            ",
        )
        .bind(user_id)
        .bind(Json(product_ids))
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
