//! Core authentication flows — register, login, refresh, logout, profile.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use medipass_core::error::AppError;
use medipass_core::result::AppResult;
use medipass_credential::jwt::TokenService;
use medipass_credential::password::{PasswordHasher, PasswordValidator};
use medipass_database::store::IdentityStore;
use medipass_entity::account::{Account, AccountStatus, CreateAccount, Role};

/// Input for a new registration.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Email address (lowercased before any use).
    pub email: String,
    /// Plaintext password, validated and hashed before storage.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Requested roles; empty means the baseline role.
    pub roles: Vec<Role>,
}

/// Result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The authenticated account.
    pub account: Account,
    /// Freshly issued access token.
    pub access_token: String,
    /// Freshly issued refresh token, now the account's single live session.
    pub refresh_token: String,
}

/// Orchestrates the five authentication operations over the identity
/// store and the token service.
///
/// Sessions are single-slot: issuing a new refresh token overwrites the
/// previous one, silently invalidating any earlier session for the same
/// account. Concurrent logins race last-write-wins on that slot.
#[derive(Clone)]
pub struct AuthService {
    /// Account persistence.
    store: Arc<dyn IdentityStore>,
    /// Token signer/verifier.
    tokens: Arc<TokenService>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy for new registrations.
    password_policy: Arc<PasswordValidator>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        store: Arc<dyn IdentityStore>,
        tokens: Arc<TokenService>,
        hasher: Arc<PasswordHasher>,
        password_policy: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            store,
            tokens,
            hasher,
            password_policy,
        }
    }

    /// Registers a new account and opens its first session.
    ///
    /// The email pre-check gives a friendly error on the common path; the
    /// store still enforces uniqueness atomically, so a racing duplicate
    /// registration fails there with the same `Conflict`.
    pub async fn register(&self, registration: Registration) -> AppResult<AuthSession> {
        let email = registration.email.to_lowercase();

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Account with this email already exists"));
        }

        self.password_policy.validate(&registration.password)?;

        let roles = if registration.roles.is_empty() {
            Role::default_set()
        } else {
            registration.roles
        };

        let password_hash = self.hasher.hash(&registration.password)?;

        let account = self
            .store
            .create(CreateAccount {
                email,
                password_hash,
                first_name: registration.first_name,
                last_name: registration.last_name,
                roles,
                status: AccountStatus::Active,
            })
            .await?;

        let session = self.open_session(account).await?;
        info!(email = %session.account.email, "New account registered");
        Ok(session)
    }

    /// Authenticates a password login and opens a fresh session.
    ///
    /// Unknown email and wrong password fail identically, so a caller
    /// cannot probe which addresses have accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let account = self
            .store
            .find_by_email_with_credential(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        let password_hash = account
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::internal("Account record is missing its credential"))?;

        if !self.hasher.verify(password, password_hash)? {
            return Err(AppError::authentication("Invalid email or password"));
        }

        let session = self.open_session(account).await?;
        info!(email = %session.account.email, "Account logged in");
        Ok(session)
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The refresh token itself is never rotated here — it stays valid
    /// until a later login overwrites it or a logout clears it. Every
    /// authentication-relevant failure (bad signature, expiry, unknown
    /// account, slot mismatch, non-active status) collapses into one
    /// generic response so the caller learns nothing about the cause.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self
            .tokens
            .verify_refresh_token(refresh_token)
            .map_err(|_| refresh_rejection())?;

        let account = self
            .store
            .find_by_id_with_refresh_token(claims.sub)
            .await?
            .ok_or_else(refresh_rejection)?;

        // A rotated or cleared slot means this token was revoked.
        if account.current_refresh_token.as_deref() != Some(refresh_token) {
            return Err(refresh_rejection());
        }

        if !account.can_refresh() {
            return Err(refresh_rejection());
        }

        let access_token =
            self.tokens
                .issue_access_token(account.id, &account.email, &account.roles)?;

        info!(email = %account.email, "New access token issued");
        Ok(access_token)
    }

    /// Ends the account's session by clearing the refresh-token slot.
    ///
    /// Idempotent at the data level: clearing an already-empty slot is a
    /// no-op, but the account must still exist.
    pub async fn logout(&self, user_id: Uuid) -> AppResult<()> {
        let account = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))?;

        self.store.store_refresh_token(user_id, None).await?;
        info!(email = %account.email, "Account logged out");
        Ok(())
    }

    /// Returns the account for a profile projection.
    ///
    /// The returned record carries neither the credential nor the refresh
    /// token — the default lookup leaves both unloaded.
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Account> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Issues a token pair for the account and persists the new session
    /// state (refresh-token slot + last login time).
    async fn open_session(&self, mut account: Account) -> AppResult<AuthSession> {
        let access_token =
            self.tokens
                .issue_access_token(account.id, &account.email, &account.roles)?;
        let refresh_token = self.tokens.issue_refresh_token(account.id)?;

        let now = Utc::now();
        self.store
            .store_refresh_token(account.id, Some(&refresh_token))
            .await?;
        self.store.record_login(account.id, now).await?;

        account.current_refresh_token = Some(refresh_token.clone());
        account.last_login_at = Some(now);

        Ok(AuthSession {
            account,
            access_token,
            refresh_token,
        })
    }
}

/// The single outward-facing refresh failure.
fn refresh_rejection() -> AppError {
    AppError::authentication("Invalid or expired refresh token provided")
}
