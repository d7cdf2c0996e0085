//! Cart sync endpoints.
//!
//! The authenticated-tier half of the cart reconciler contract:
//!
//! - `GET /cart` - current lines (401 resolves the client to guest tier)
//! - `PUT /cart` - full replace
//! - `POST /cart` - add-or-increment one line by identity key
//!
//! The add-or-increment merge uses the same helper the client applies
//! optimistically (`atelier_core::add_or_increment`), so both sides of the
//! sync boundary share one definition of line identity.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use atelier_core::{CartLine, add_or_increment};

use crate::db::saved_collections::SavedCollectionRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Wire envelope for cart payloads, both directions.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartEnvelope {
    pub cart: Vec<CartLine>,
}

/// `POST /cart` request body.
#[derive(Debug, Deserialize)]
pub struct CartAddBody {
    pub item: CartLine,
}

/// Get the current user's cart.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartEnvelope>> {
    let cart = SavedCollectionRepository::new(state.pool())
        .get_cart(user.id)
        .await?;
    Ok(Json(CartEnvelope { cart }))
}

/// Replace the current user's cart with the submitted lines.
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn put_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(mut body): Json<CartEnvelope>,
) -> Result<Json<CartEnvelope>> {
    for line in &mut body.cart {
        line.clamp_quantity();
    }

    let repo = SavedCollectionRepository::new(state.pool());
    repo.replace_cart(user.id, &body.cart).await?;
    Ok(Json(CartEnvelope { cart: body.cart }))
}

/// Add a line to the current user's cart, merging by identity key.
#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn post_cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CartAddBody>,
) -> Result<Json<CartEnvelope>> {
    let mut item = body.item;
    item.clamp_quantity();

    let repo = SavedCollectionRepository::new(state.pool());
    let mut cart = repo.get_cart(user.id).await?;
    add_or_increment(&mut cart, item);
    repo.replace_cart(user.id, &cart).await?;

    Ok(Json(CartEnvelope { cart }))
}
