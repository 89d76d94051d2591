//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medipass_entity::account::Role;

/// Context for the current authenticated request.
///
/// Built from verified access-token claims and passed into service
/// methods so that every operation knows *who* is acting. The claims are
/// trusted for the token's full validity window; the store is not
/// consulted again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account's ID.
    pub user_id: Uuid,
    /// The account email at token issuance time.
    pub email: String,
    /// The account roles at token issuance time.
    pub roles: Vec<Role>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, roles: Vec<Role>) -> Self {
        Self {
            user_id,
            email,
            roles,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current account holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
