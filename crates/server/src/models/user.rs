//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use carbon_shop_core::{Email, Footprint, UserId};

/// A shop user (domain type).
///
/// The password hash never lives on this type; repositories return it
/// separately to the auth service and nothing else ever sees it.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Running total of carbon saved across all orders.
    pub carbon_saved: Footprint,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user, safe to return from the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub carbon_saved: Footprint,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            carbon_saved: user.carbon_saved,
        }
    }
}
