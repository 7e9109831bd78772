//! User domain types.

use serde::{Deserialize, Serialize};

use agrow_core::{Email, PhoneNumber, UserId};

/// A signed-in farmer.
///
/// Created by the simulated login and registration flows and kept in the
/// session under [`USER`](crate::models::session_keys::USER).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Known only for users who registered in this session.
    pub email: Option<Email>,
    pub is_active: bool,
    pub state: Option<String>,
    pub city: Option<String>,
    pub phone: Option<PhoneNumber>,
    #[serde(default)]
    pub crop_preferences: Vec<String>,
}

/// A user paired with the opaque token that authenticates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}
