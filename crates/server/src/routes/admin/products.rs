//! Admin product CRUD.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use atelier_core::ProductId;

use crate::db::products::{Product, ProductFilter, ProductInput, ProductRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List all products.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .list(ProductFilter::default())
        .await?;
    Ok(Json(products))
}

/// Create a product.
#[instrument(skip(state, _admin, input))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = ProductRepository::new(state.pool()).create(&input).await?;
    state.invalidate_catalog_cache();
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product.
#[instrument(skip(state, _admin, input))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &input)
        .await?;
    state.invalidate_catalog_cache();
    Ok(Json(product))
}

/// Delete a product.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;
    state.invalidate_catalog_cache();
    Ok(StatusCode::NO_CONTENT)
}
