//! Admin order management.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::{OrderId, OrderStatus};

use crate::db::orders::{Order, OrderRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List all orders.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(orders))
}

/// Status change request body.
#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: OrderStatus,
}

/// Update an order's status.
#[instrument(skip(state, _admin))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .set_status(OrderId::new(id), body.status)
        .await?;
    Ok(Json(order))
}
