//! Integration tests for the wishlist sync contract.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied and a
//!   seeded catalog (cargo run -p atelier-cli -- seed)
//! - The server running (cargo run -p atelier-server)
//!
//! Run with: cargo test -p atelier-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use atelier_integration_tests::{base_url, http_client, register_fresh_account};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_wishlist_requires_session() {
    let resp = http_client()
        .get(format!("{}/wishlist", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database, seeded catalog"]
async fn test_toggle_is_involutive() {
    let (client, _email) = register_fresh_account().await;
    let base = base_url();

    // Pick a real product so population works.
    let products: Value = client
        .get(format!("{base}/products"))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid json");
    let product_id = products
        .as_array()
        .and_then(|list| list.first())
        .map(|p| p["id"].clone())
        .expect("seeded catalog has products");

    // First toggle adds...
    let body: Value = client
        .post(format!("{base}/wishlist"))
        .json(&json!({ "productId": product_id }))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid json");
    assert_eq!(body["wishlist"].as_array().map(Vec::len), Some(1));

    // ...and the entry comes back populated from the catalog.
    let entry = &body["wishlist"][0];
    assert_eq!(entry["productId"], product_id);
    assert!(entry["title"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(entry["priceDisplay"].as_str().is_some_and(|p| !p.is_empty()));

    // Second toggle removes.
    let body: Value = client
        .post(format!("{base}/wishlist"))
        .json(&json!({ "productId": product_id }))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid json");
    assert_eq!(body["wishlist"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_admin_surface_is_gated() {
    let (client, _email) = register_fresh_account().await;

    // A fresh account is not an admin: 403.
    let resp = client
        .get(format!("{}/admin/products", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // No session at all: 401.
    let resp = http_client()
        .get(format!("{}/admin/products", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
