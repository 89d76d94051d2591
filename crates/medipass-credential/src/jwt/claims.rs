//! JWT claims structures for access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use medipass_entity::account::Role;

/// Claims payload embedded in every access token.
///
/// Carries exactly the identity context a request needs: the account id,
/// the (lowercased) email, and the role set at issuance time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Account email at the time of issuance.
    pub email: String,
    /// Account roles at the time of issuance.
    pub roles: Vec<Role>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuing service.
    pub iss: String,
}

/// Claims payload embedded in every refresh token.
///
/// Deliberately minimal: only the account ID. Everything else is looked
/// up fresh when the token is redeemed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuing service.
    pub iss: String,
}
