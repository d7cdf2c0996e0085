//! Public category listing.

use axum::{Json, extract::State};
use tracing::{debug, instrument};

use crate::db::categories::{Category, CategoryRepository};
use crate::error::Result;
use crate::state::{AppState, CacheValue};

const CACHE_KEY: &str = "categories";

/// List all categories.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    if let Some(CacheValue::Categories(categories)) =
        state.catalog_cache().get(CACHE_KEY).await
    {
        debug!("Cache hit for categories");
        return Ok(Json(categories));
    }

    let categories = CategoryRepository::new(state.pool()).list().await?;

    state
        .catalog_cache()
        .insert(CACHE_KEY.to_string(), CacheValue::Categories(categories.clone()))
        .await;

    Ok(Json(categories))
}
