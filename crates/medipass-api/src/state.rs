//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use medipass_core::config::AppConfig;
use medipass_credential::jwt::TokenService;
use medipass_database::store::IdentityStore;
use medipass_service::auth::AuthService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Identity store backend.
    pub identity_store: Arc<dyn IdentityStore>,
    /// Token signer/verifier.
    pub token_service: Arc<TokenService>,
    /// Authentication orchestrator.
    pub auth_service: Arc<AuthService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("token_service", &self.token_service)
            .finish()
    }
}
