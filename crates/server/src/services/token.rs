//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs with `sub` (user ID), `iat`, and `exp` claims.
//! The signing secret comes from configuration and is validated at startup;
//! it never appears in source.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind, get_current_timestamp,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use carbon_shop_core::UserId;

/// Errors that can occur issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token has expired.
    #[error("token expired")]
    Expired,

    /// Token is malformed, tampered with, or signed with another key.
    #[error("invalid token")]
    Invalid,

    /// Token could not be created.
    #[error("token creation failed")]
    Creation,
}

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the authenticated user's ID.
    sub: i64,
    /// Issued-at (seconds since epoch).
    iat: u64,
    /// Expiry (seconds since epoch).
    exp: u64,
}

/// Issues and verifies signed, time-limited session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    /// Create a token service from the configured signing secret and TTL.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_secs: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl_secs,
        }
    }

    /// Issue a token for the given user.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Creation` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: user_id.as_i64(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Creation)
    }

    /// Verify a token and return the user it identifies.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` if the token's `exp` has passed.
    /// Returns `TokenError::Invalid` for any other verification failure
    /// (bad signature, malformed token, wrong algorithm).
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        Ok(UserId::new(data.claims.sub))
    }
}
