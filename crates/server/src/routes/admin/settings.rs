//! Admin site-settings surface.

use axum::{Json, extract::State};
use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::db::settings::{get_settings, put_settings};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Get the site settings document.
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<JsonValue>> {
    let settings = get_settings(state.pool()).await?;
    Ok(Json(settings))
}

/// Replace the site settings document.
#[instrument(skip(state, _admin, body))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(body): Json<JsonValue>,
) -> Result<Json<JsonValue>> {
    put_settings(state.pool(), &body).await?;
    Ok(Json(body))
}
