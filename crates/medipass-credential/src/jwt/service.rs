//! Token signing and verification with independent access/refresh secrets.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use uuid::Uuid;

use medipass_core::config::auth::AuthConfig;
use medipass_core::error::AppError;
use medipass_entity::account::Role;

use super::claims::{AccessClaims, RefreshClaims};

/// Signs and verifies the two token kinds.
///
/// Access and refresh tokens use independent HMAC secrets and expiries,
/// so neither kind verifies under the other's key. The issuer string is
/// embedded on signing and required on verification. All state is fixed
/// at construction.
#[derive(Clone)]
pub struct TokenService {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
    /// Access token TTL in hours.
    access_ttl_hours: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
    /// Issuer claim value.
    issuer: String,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl_hours", &self.access_ttl_hours)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl TokenService {
    /// Creates a new token service from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            access_encoding_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_validation: validation.clone(),
            refresh_validation: validation,
            access_ttl_hours: config.access_ttl_hours as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
            issuer: config.issuer.clone(),
        }
    }

    /// Signs a new access token carrying the account's identity claims.
    pub fn issue_access_token(
        &self,
        account_id: Uuid,
        email: &str,
        roles: &[Role],
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: account_id,
            email: email.to_string(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::hours(self.access_ttl_hours)).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.access_encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))
    }

    /// Signs a new refresh token carrying only the account ID.
    pub fn issue_refresh_token(&self, account_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: account_id,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::days(self.refresh_ttl_days)).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.refresh_encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))
    }

    /// Verifies an access token string and returns its claims.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        decode::<AccessClaims>(token, &self.access_decoding_key, &self.access_validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => {
                    AppError::authentication("Access token has expired")
                }
                JwtErrorKind::InvalidToken | JwtErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid access token")
                }
                _ => AppError::authentication(format!("Access token verification failed: {e}")),
            })
    }

    /// Verifies a refresh token string and returns its claims.
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        decode::<RefreshClaims>(token, &self.refresh_decoding_key, &self.refresh_validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => {
                    AppError::authentication("Refresh token has expired")
                }
                JwtErrorKind::InvalidToken | JwtErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid refresh token")
                }
                _ => AppError::authentication(format!("Refresh token verification failed: {e}")),
            })
    }

    /// Extracts the token from an `Authorization` header value.
    ///
    /// Accepts only the exact two-part form `Bearer <token>`. Any other
    /// shape (missing, wrong scheme, extra parts) yields `None`.
    pub fn extract_bearer_token(header: &str) -> Option<&str> {
        let mut parts = header.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
            _ => None,
        }
    }
}
