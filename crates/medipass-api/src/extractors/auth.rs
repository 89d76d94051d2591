//! `AuthUser` extractor — pulls the bearer token from the Authorization
//! header, verifies it, and injects the identity context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use medipass_core::error::AppError;
use medipass_credential::jwt::TokenService;
use medipass_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated identity available in handlers.
///
/// Verification is purely cryptographic: a token that checks out is
/// trusted for its full validity window without consulting the identity
/// store.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(TokenService::extract_bearer_token)
            .ok_or_else(|| AppError::authentication("No token provided"))?;

        let claims = state.token_service.verify_access_token(token)?;

        Ok(AuthUser(RequestContext::new(
            claims.sub,
            claims.email,
            claims.roles,
        )))
    }
}
