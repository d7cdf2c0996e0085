//! Order route handlers.
//!
//! Orders are checkout-adjacent records: the storefront captures what was
//! ordered and where it ships; payment settles out of band.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use atelier_core::{CartLine, subtotal};

use crate::db::orders::{Order, OrderRepository, ShippingDetails};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Order creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub lines: Vec<CartLine>,
    pub shipping: ShippingDetails,
}

/// Create an order from the submitted lines.
///
/// The subtotal is recomputed server-side from the lines' display prices;
/// a client-supplied total is never trusted.
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateOrderBody>,
) -> Result<(StatusCode, Json<Order>)> {
    if body.lines.is_empty() {
        return Err(AppError::BadRequest("order has no lines".to_string()));
    }

    let mut lines = body.lines;
    for line in &mut lines {
        line.clamp_quantity();
    }

    let order_subtotal = subtotal(&lines);
    let order = OrderRepository::new(state.pool())
        .create(user.id, &lines, order_subtotal, &body.shipping)
        .await?;

    tracing::info!(order_id = %order.id, "Order created");
    Ok((StatusCode::CREATED, Json(order)))
}

/// List the current user's orders.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}
