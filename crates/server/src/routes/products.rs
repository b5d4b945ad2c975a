//! Catalog route handlers.

use axum::{Json, extract::State};

use crate::db::ProductRepository;
use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// `GET /api/products` - the full catalog, no filtering or pagination.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}
