//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health             - Liveness check
//! GET  /health/ready       - Readiness check (verifies database)
//!
//! # Auth (no token)
//! POST /api/register       - Create account, returns {token, user}
//! POST /api/login          - Authenticate, returns {token, user}
//!
//! # Catalog (no token)
//! GET  /api/products       - Full product list
//!
//! # Orders (bearer token)
//! POST /api/orders         - Place an order
//! GET  /api/orders         - The caller's orders, newest first
//!
//! # Account (bearer token)
//! GET  /api/user           - The caller's public profile
//!
//! # Real-time
//! GET  /ws                 - WebSocket; server pushes newOrder events
//! ```

pub mod account;
pub mod auth;
pub mod events;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/products", get(products::list))
        .route("/orders", post(orders::create).get(orders::list))
        .route("/user", get(account::current_user))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws", get(events::ws))
}
