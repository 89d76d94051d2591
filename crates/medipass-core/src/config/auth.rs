//! Authentication and token configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// Access and refresh tokens are signed with independent secrets so that
/// a leaked token of one kind can never be replayed as the other. The
/// issuer string is embedded in every token and checked on verification,
/// which rejects tokens minted by a differently-configured instance.
/// All values are fixed at process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing (HMAC-SHA256).
    #[serde(default = "default_access_secret")]
    pub access_secret: String,
    /// Secret key for refresh token signing (HMAC-SHA256).
    #[serde(default = "default_refresh_secret")]
    pub refresh_secret: String,
    /// Access token TTL in hours.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_hours: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Issuer claim embedded in every signed token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: default_access_secret(),
            refresh_secret: default_refresh_secret(),
            access_ttl_hours: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            issuer: default_issuer(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_access_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_refresh_secret() -> String {
    "CHANGE_ME_TOO_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    24
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_issuer() -> String {
    "medipass-auth".to_string()
}

fn default_password_min() -> usize {
    8
}
