//! Public catalog route handlers.
//!
//! Listings are cached for 5 minutes (see `AppState::catalog_cache`);
//! admin mutations invalidate the cache.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::{debug, instrument};

use atelier_core::{CategoryId, ProductId};

use crate::db::products::{Product, ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::state::{AppState, CacheValue};

/// Catalog listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<i32>,
    #[serde(default)]
    pub featured: bool,
}

/// List products, filtered by category and/or featured flag.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let cache_key = format!(
        "products:{}:{}",
        query.category.unwrap_or(0),
        query.featured
    );

    if let Some(CacheValue::Products(products)) = state.catalog_cache().get(&cache_key).await {
        debug!("Cache hit for products");
        return Ok(Json(products));
    }

    let filter = ProductFilter {
        category_id: query.category.map(CategoryId::new),
        featured_only: query.featured,
    };
    let products = ProductRepository::new(state.pool()).list(filter).await?;

    state
        .catalog_cache()
        .insert(cache_key, CacheValue::Products(products.clone()))
        .await;

    Ok(Json(products))
}

/// Get a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}
