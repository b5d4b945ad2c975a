//! Integration tests for Carbon Shop.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations and start the server
//! cargo run -p carbon-shop-cli -- migrate
//! cargo run -p carbon-shop-server
//!
//! # Run integration tests (they are #[ignore]d by default)
//! cargo test -p carbon-shop-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP (and WebSocket for the
//! broadcast tests). The server's base URL is configurable via
//! `SHOP_BASE_URL` (default `http://localhost:5000`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::{Value, json};

/// Base URL for the shop API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHOP_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// The base URL with a `ws://` scheme, for WebSocket connections.
#[must_use]
pub fn ws_url() -> String {
    let http = base_url();
    let ws = http
        .replacen("https://", "wss://", 1)
        .replacen("http://", "ws://", 1);
    format!("{ws}/ws")
}

/// Create an HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email per test run, so tests never collide on the unique
/// constraint.
#[must_use]
pub fn unique_email() -> String {
    format!("shopper-{}@example.com", uuid::Uuid::new_v4())
}

/// Register a fresh account and return the response body `{token, user}`.
///
/// # Panics
///
/// Panics if the request fails or the response is not 201.
pub async fn register(client: &reqwest::Client, email: &str) -> Value {
    let resp = client
        .post(format!("{}/api/register", base_url()))
        .json(&json!({
            "email": email,
            "password": "correct horse battery",
            "name": "Test Shopper",
        }))
        .send()
        .await
        .expect("register request failed");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
    resp.json().await.expect("register response was not JSON")
}

/// Extract the bearer token from a `{token, user}` response body.
///
/// # Panics
///
/// Panics if the body has no string `token` field.
#[must_use]
pub fn token_of(session: &Value) -> String {
    session["token"]
        .as_str()
        .expect("session body missing token")
        .to_string()
}
