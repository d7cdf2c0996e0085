//! Admin category CRUD.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use atelier_core::CategoryId;

use crate::db::categories::{Category, CategoryInput, CategoryRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List all categories.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// Create a category.
#[instrument(skip(state, _admin))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = CategoryRepository::new(state.pool()).create(&input).await?;
    state.invalidate_catalog_cache();
    Ok((StatusCode::CREATED, Json(category)))
}

/// Rename a category.
#[instrument(skip(state, _admin))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>> {
    let category = CategoryRepository::new(state.pool())
        .update(CategoryId::new(id), &input)
        .await?;
    state.invalidate_catalog_cache();
    Ok(Json(category))
}

/// Delete a category.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;
    state.invalidate_catalog_cache();
    Ok(StatusCode::NO_CONTENT)
}
