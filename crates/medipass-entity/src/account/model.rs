//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;
use super::status::AccountStatus;

/// A registered account in the MediPass system.
///
/// `password_hash` and `current_refresh_token` are only populated by the
/// opt-in store lookups and are never serialized, so no read path can
/// leak them by accident.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier, assigned at creation.
    pub id: Uuid,
    /// Email address, lowercased at write time, globally unique.
    pub email: String,
    /// Argon2id password hash. `None` unless loaded with credentials.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Non-empty set of role tags.
    pub roles: Vec<Role>,
    /// Account lifecycle status.
    pub status: AccountStatus,
    /// The single currently-valid refresh token, if a session is live.
    /// `None` unless loaded with the refresh token slot.
    #[serde(skip_serializing)]
    pub current_refresh_token: Option<String>,
    /// Last successful login or registration time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Whether this account may currently refresh its session.
    pub fn can_refresh(&self) -> bool {
        self.status.can_refresh()
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Email address (stored lowercased).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Assigned roles (must be non-empty).
    pub roles: Vec<Role>,
    /// Initial status.
    pub status: AccountStatus,
}
