//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`. Bodies are JSON `{"error": "..."}`, the shape the
//! shop's clients consume.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, OrderError, TokenError};

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Token operation failed (issuance; verification failures are
    /// rejected earlier by the extractor).
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The HTTP status this error maps to.
    ///
    /// Mapping: validation and duplicate errors are 400, an unknown login
    /// email is 404, a wrong password is 401, and storage or runtime
    /// failures are 500.
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::EmailTaken
                | AuthError::InvalidEmail(_)
                | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Order(err) => match err {
                OrderError::Empty | OrderError::ZeroQuantity | OrderError::UnknownProduct(_) => {
                    StatusCode::BAD_REQUEST
                }
                OrderError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Token(err) => match err {
                TokenError::Creation => StatusCode::INTERNAL_SERVER_ERROR,
                TokenError::Expired | TokenError::Invalid => StatusCode::FORBIDDEN,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The client-facing message. Internal details are never exposed.
    fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "internal server error".to_string(),
            Self::Auth(err) => match err {
                AuthError::UserNotFound => "user not found".to_string(),
                AuthError::InvalidCredentials => "invalid password".to_string(),
                AuthError::EmailTaken => {
                    "an account with this email already exists".to_string()
                }
                AuthError::InvalidEmail(e) => e.to_string(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "internal server error".to_string()
                }
            },
            Self::Order(err) => match err {
                OrderError::Repository(_) => "internal server error".to_string(),
                other => other.to_string(),
            },
            Self::Token(err) => match err {
                TokenError::Creation => "internal server error".to_string(),
                other => other.to_string(),
            },
            Self::NotFound(what) => format!("not found: {what}"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }

    /// Whether this error should be captured to Sentry.
    fn is_server_error(&self) -> bool {
        self.status() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use carbon_shop_core::ProductId;

    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Auth(AuthError::EmailTaken).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Auth(AuthError::UserNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Auth(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Order(OrderError::UnknownProduct(ProductId::new(9))).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(RepositoryError::NotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "invalid email in database: user 17".to_string(),
        ));
        assert_eq!(err.message(), "internal server error");
    }

    #[test]
    fn test_error_body_shape() {
        let response = AppError::Auth(AuthError::EmailTaken).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_product_message_names_the_product() {
        let err = AppError::Order(OrderError::UnknownProduct(ProductId::new(42)));
        assert_eq!(err.message(), "unknown product: 42");
    }
}
