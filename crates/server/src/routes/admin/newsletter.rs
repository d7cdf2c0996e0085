//! Admin newsletter subscriber management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use atelier_core::SubscriberId;

use crate::db::subscribers::{Subscriber, SubscriberRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List all subscribers.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Subscriber>>> {
    let subscribers = SubscriberRepository::new(state.pool()).list().await?;
    Ok(Json(subscribers))
}

/// Remove a subscriber.
#[instrument(skip(state, _admin))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    SubscriberRepository::new(state.pool())
        .delete(SubscriberId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
