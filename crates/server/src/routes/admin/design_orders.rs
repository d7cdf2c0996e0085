//! Admin design-order management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::{DesignOrderId, DesignOrderStatus};

use crate::db::design_orders::{DesignOrder, DesignOrderRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List all design orders.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<DesignOrder>>> {
    let orders = DesignOrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Status change request body.
#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: DesignOrderStatus,
}

/// Update a design order's status.
#[instrument(skip(state, _admin))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<DesignOrder>> {
    let order = DesignOrderRepository::new(state.pool())
        .set_status(DesignOrderId::new(id), body.status)
        .await?;
    Ok(Json(order))
}
