//! Integration tests for Atelier.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p atelier-cli -- migrate
//!
//! # Start the server
//! cargo run -p atelier-server
//!
//! # Run integration tests (ignored by default)
//! cargo test -p atelier-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP; they create their own
//! throwaway accounts (unique emails per run) and never assume seeded
//! data beyond an empty, migrated database.

use reqwest::Client;
use serde_json::json;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ATELIER_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A cookie-keeping HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed (test context only).
#[must_use]
pub fn http_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Register a fresh account and return its logged-in client and email.
///
/// # Panics
///
/// Panics if registration fails (test context only).
pub async fn register_fresh_account() -> (Client, String) {
    let client = http_client();
    let email = format!("it-{}@atelier.test", uuid::Uuid::new_v4().simple());

    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({ "email": email, "password": "integration-test-pw" }))
        .send()
        .await
        .expect("Failed to register test account");
    assert!(
        resp.status().is_success(),
        "registration failed: {}",
        resp.status()
    );

    (client, email)
}
