//! Order route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::{Order, OrderLine};
use crate::services::OrderService;
use crate::state::AppState;

/// Order placement request body: `{"products": [{"product": 1, "quantity": 2}]}`.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub products: Vec<OrderLine>,
}

/// `POST /api/orders` - place an order for the authenticated user.
///
/// Responds 201 with the created order (line items resolved to full product
/// records); 400 for an empty cart, a zero quantity, or an unknown product.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let orders = OrderService::new(state.pool(), state.broadcaster());
    let order = orders.place(user_id, &req.products).await?;

    tracing::info!(
        order_id = %order.id,
        user_id = %user_id,
        total_carbon = %order.total_carbon,
        "order placed"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders` - the authenticated user's orders, newest first.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderService::new(state.pool(), state.broadcaster());
    Ok(Json(orders.list(user_id).await?))
}
