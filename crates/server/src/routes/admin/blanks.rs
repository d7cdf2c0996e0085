//! Admin blank-product CRUD.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use atelier_core::BlankProductId;

use crate::db::blank_products::{BlankProduct, BlankProductInput, BlankProductRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List all blanks, including inactive ones.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<BlankProduct>>> {
    let blanks = BlankProductRepository::new(state.pool()).list(true).await?;
    Ok(Json(blanks))
}

/// Create a blank.
#[instrument(skip(state, _admin, input))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<BlankProductInput>,
) -> Result<(StatusCode, Json<BlankProduct>)> {
    let blank = BlankProductRepository::new(state.pool())
        .create(&input)
        .await?;
    Ok((StatusCode::CREATED, Json(blank)))
}

/// Replace a blank.
#[instrument(skip(state, _admin, input))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(input): Json<BlankProductInput>,
) -> Result<Json<BlankProduct>> {
    let blank = BlankProductRepository::new(state.pool())
        .update(BlankProductId::new(id), &input)
        .await?;
    Ok(Json(blank))
}

/// Delete a blank.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    BlankProductRepository::new(state.pool())
        .delete(BlankProductId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
