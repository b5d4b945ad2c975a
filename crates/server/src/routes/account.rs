//! Account route handlers.

use axum::{Json, extract::State};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::models::PublicUser;
use crate::services::AuthService;
use crate::state::AppState;

/// `GET /api/user` - the authenticated user's public profile.
///
/// Fetched fresh from the database so `carbonSaved` reflects all orders
/// placed since the token was issued. Never includes the credential field.
pub async fn current_user(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<PublicUser>> {
    let user = AuthService::new(state.pool()).get_user(user_id).await?;
    Ok(Json(user.into()))
}
