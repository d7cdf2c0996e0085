//! Design studio route handlers.
//!
//! The studio's server side is deliberately thin: blanks are served with
//! their mockup views and print zones, and submitted designs are stored
//! as the layer stack the customer built. Validation is structural only -
//! every layer must target a zone that exists on the blank. No rendering
//! or layout math happens here.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use atelier_core::BlankProductId;

use crate::db::blank_products::{BlankProduct, BlankProductRepository};
use crate::db::design_orders::{DesignOrder, DesignOrderInput, DesignOrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// List active blanks for the studio.
#[instrument(skip(state))]
pub async fn list_blanks(State(state): State<AppState>) -> Result<Json<Vec<BlankProduct>>> {
    let blanks = BlankProductRepository::new(state.pool()).list(false).await?;
    Ok(Json(blanks))
}

/// Get one blank with its views and zones.
#[instrument(skip(state))]
pub async fn show_blank(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BlankProduct>> {
    let blank = BlankProductRepository::new(state.pool())
        .get(BlankProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blank product {id}")))?;
    Ok(Json(blank))
}

/// Submit a design order.
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn create_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<DesignOrderInput>,
) -> Result<(StatusCode, Json<DesignOrder>)> {
    if body.quantity < 1 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }
    if body.layers.is_empty() {
        return Err(AppError::BadRequest("design has no layers".to_string()));
    }

    let blank = BlankProductRepository::new(state.pool())
        .get(body.blank_product_id)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!("unknown blank product {}", body.blank_product_id))
        })?;

    if !blank.active {
        return Err(AppError::BadRequest(format!(
            "blank product {} is no longer available",
            blank.id
        )));
    }

    // Every layer must sit in a zone the blank actually has.
    for layer in &body.layers {
        if !blank.has_zone(&layer.view, &layer.zone) {
            return Err(AppError::BadRequest(format!(
                "blank {} has no zone '{}' on view '{}'",
                blank.id, layer.zone, layer.view
            )));
        }
    }

    let order = DesignOrderRepository::new(state.pool())
        .create(user.id, &body, blank.base_price)
        .await?;

    tracing::info!(design_order_id = %order.id, "Design order submitted");
    Ok((StatusCode::CREATED, Json(order)))
}

/// List the current user's design orders.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<DesignOrder>>> {
    let orders = DesignOrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}
