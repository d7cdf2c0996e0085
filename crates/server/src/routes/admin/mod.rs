//! Admin back-office API.
//!
//! Every surface here follows one fixed shape: list the resource, mutate
//! it via REST, let the client refetch. The only gate is the
//! `RequireAdmin` extractor on each handler; there is no per-resource
//! business rule.

pub mod blanks;
pub mod categories;
pub mod clients;
pub mod design_orders;
pub mod newsletter;
pub mod orders;
pub mod products;
pub mod settings;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the `/admin` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            put(products::update).delete(products::delete),
        )
        .route("/blanks", get(blanks::index).post(blanks::create))
        .route("/blanks/{id}", put(blanks::update).delete(blanks::delete))
        .route(
            "/categories",
            get(categories::index).post(categories::create),
        )
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::delete),
        )
        .route("/clients", get(clients::index))
        .route("/clients/{id}/admin", post(clients::set_admin))
        .route("/orders", get(orders::index))
        .route("/orders/{id}/status", post(orders::set_status))
        .route("/design-orders", get(design_orders::index))
        .route("/design-orders/{id}/status", post(design_orders::set_status))
        .route("/newsletter", get(newsletter::index))
        .route("/newsletter/{id}", axum::routing::delete(newsletter::delete))
        .route("/settings", get(settings::show).put(settings::update))
}
