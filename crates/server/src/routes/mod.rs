//! HTTP route handlers for the storefront and admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Catalog
//! GET  /products               - Product listing (?category=, ?featured=)
//! GET  /products/{id}          - Product detail
//! GET  /categories             - Category listing
//!
//! # Cart sync (authenticated tier of the reconciler)
//! GET  /cart                   - Current lines, 401 when not logged in
//! PUT  /cart                   - Full replace
//! POST /cart                   - Add-or-increment one line
//!
//! # Wishlist sync
//! GET  /wishlist               - Populated entries, 401 when not logged in
//! POST /wishlist               - Toggle membership by productId
//!
//! # Design studio
//! GET  /blanks                 - Active blanks with views/zones
//! GET  /blanks/{id}            - Blank detail
//! POST /design-orders          - Submit a design (requires auth)
//! GET  /design-orders          - Own design orders (requires auth)
//!
//! # Orders
//! POST /orders                 - Create an order record (requires auth)
//! GET  /orders                 - Own orders (requires auth)
//!
//! # Newsletter
//! POST /newsletter/subscribe
//! GET  /newsletter/unsubscribe/{token}
//!
//! # Auth
//! POST /auth/register          - Create account + session
//! POST /auth/login             - Create session
//! POST /auth/logout            - Destroy session
//! GET  /auth/me                - Current user
//!
//! # Admin (requires admin flag)
//! /admin/products, /admin/blanks, /admin/categories, /admin/clients,
//! /admin/orders, /admin/design-orders, /admin/newsletter, /admin/settings
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod design;
pub mod newsletter;
pub mod orders;
pub mod products;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/categories", get(categories::index))
}

/// Create the cart/wishlist sync routes router.
pub fn sync_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cart",
            get(cart::get_cart).put(cart::put_cart).post(cart::post_cart),
        )
        .route(
            "/wishlist",
            get(wishlist::get_wishlist).post(wishlist::toggle_wishlist),
        )
}

/// Create the design studio routes router.
pub fn design_routes() -> Router<AppState> {
    Router::new()
        .route("/blanks", get(design::list_blanks))
        .route("/blanks/{id}", get(design::show_blank))
        .route(
            "/design-orders",
            get(design::list_orders).post(design::create_order),
        )
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(sync_routes())
        .merge(design_routes())
        .route("/orders", get(orders::index).post(orders::create))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route(
            "/newsletter/unsubscribe/{token}",
            get(newsletter::unsubscribe),
        )
        .nest("/auth", auth_routes())
        .nest("/admin", admin::routes())
}
