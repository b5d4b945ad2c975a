//! Authentication route handlers.
//!
//! Registration and login both succeed with a freshly issued bearer token
//! plus the user's public fields.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::PublicUser;
use crate::services::AuthService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful auth response: a session token plus public user fields.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: PublicUser,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/register` - create an account.
///
/// Responds 201 with `{token, user}`; 400 when the email is taken, the email
/// is malformed, or the password is too weak.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let auth = AuthService::new(state.pool());
    let user = auth.register(&req.email, &req.password, &req.name).await?;

    tracing::info!(user_id = %user.id, "user registered");

    let token = state.tokens().issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// `POST /api/login` - authenticate with email and password.
///
/// Responds 200 with `{token, user}`; 404 for an unknown email, 401 for a
/// wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&req.email, &req.password).await?;

    let token = state.tokens().issue(user.id)?;

    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}
