//! Wishlist sync endpoints.
//!
//! - `GET /wishlist` - the user's entries, populated from the catalog
//!   (401 resolves the client to guest tier)
//! - `POST /wishlist` - toggle membership for one product; the server
//!   decides whether the toggle means add or remove
//!
//! Only product refs are stored; titles, prices, and images are
//! re-populated from the catalog on every fetch so entries never go stale.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use atelier_core::{ProductId, WishlistEntry};

use crate::db::products::{Product, ProductRepository};
use crate::db::saved_collections::SavedCollectionRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Wire envelope for wishlist responses.
#[derive(Debug, Serialize)]
pub struct WishlistEnvelope {
    pub wishlist: Vec<WishlistEntry>,
}

/// `POST /wishlist` request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBody {
    pub product_id: ProductId,
}

fn entry_from_product(product: &Product, category_name: &str) -> WishlistEntry {
    WishlistEntry {
        product_id: product.id,
        title: product.title.clone(),
        price_display: product.price_display.clone(),
        image_ref: product.image_ref.clone(),
        category: category_name.to_string(),
    }
}

/// Populate stored refs into full entries, keeping the stored order.
/// Refs pointing at deleted products are silently dropped.
async fn populate(state: &AppState, refs: &[ProductId]) -> Result<Vec<WishlistEntry>> {
    if refs.is_empty() {
        return Ok(Vec::new());
    }

    let products = ProductRepository::new(state.pool()).get_many(refs).await?;
    let categories = crate::db::categories::CategoryRepository::new(state.pool())
        .list()
        .await?;

    let category_name = |product: &Product| {
        product
            .category_id
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .map_or("", |c| c.name.as_str())
            .to_string()
    };

    Ok(refs
        .iter()
        .filter_map(|id| products.iter().find(|p| p.id == *id))
        .map(|p| entry_from_product(p, &category_name(p)))
        .collect())
}

/// Get the current user's wishlist, populated from the catalog.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_wishlist(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<WishlistEnvelope>> {
    let refs = SavedCollectionRepository::new(state.pool())
        .get_wishlist_refs(user.id)
        .await?;
    let wishlist = populate(&state, &refs).await?;
    Ok(Json(WishlistEnvelope { wishlist }))
}

/// Toggle a product's membership in the current user's wishlist.
#[instrument(skip(state, user), fields(user_id = %user.id, product_id = %body.product_id))]
pub async fn toggle_wishlist(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<ToggleBody>,
) -> Result<Json<WishlistEnvelope>> {
    let repo = SavedCollectionRepository::new(state.pool());
    let mut refs = repo.get_wishlist_refs(user.id).await?;

    if refs.contains(&body.product_id) {
        refs.retain(|id| *id != body.product_id);
    } else {
        refs.push(body.product_id);
    }

    repo.replace_wishlist_refs(user.id, &refs).await?;

    let wishlist = populate(&state, &refs).await?;
    Ok(Json(WishlistEnvelope { wishlist }))
}
