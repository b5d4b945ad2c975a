//! Bearer token authentication extractor.
//!
//! Routes that require authentication take a [`CurrentUser`] parameter.
//! A request without an `Authorization: Bearer` header is rejected with
//! 401; a request whose token fails verification (bad signature, expired)
//! is rejected with 403.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use carbon_shop_core::UserId;

use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user_id): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, user {user_id}!")
/// }
/// ```
pub struct CurrentUser(pub UserId);

/// Error returned when bearer authentication fails.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthRejection {
    /// No (or malformed) `Authorization: Bearer` header.
    MissingToken,
    /// Token present but failed verification.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "missing bearer token"),
            Self::InvalidToken => (StatusCode::FORBIDDEN, "invalid token"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection::MissingToken)?;

        let user_id = state
            .tokens()
            .verify(token)
            .map_err(|_| AuthRejection::InvalidToken)?;

        Ok(Self(user_id))
    }
}

/// Extract the bearer token from a request's `Authorization` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/orders");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extracts_value() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_empty_value() {
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&parts), None);
    }
}
