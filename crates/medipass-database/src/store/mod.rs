//! Identity store — the persistence seam for account records.
//!
//! The service layer only ever talks to the [`IdentityStore`] trait.
//! Production uses the PostgreSQL backend; the in-memory backend covers
//! single-node deployments and tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use medipass_core::result::AppResult;
use medipass_entity::account::{Account, CreateAccount};

/// Persistence contract for account records.
///
/// Lookups come in two flavors: the default variants leave the password
/// hash and refresh-token slot unloaded (`None`), the `with_*` variants
/// opt in to exactly one of them. Email uniqueness is enforced by the
/// backend itself — callers may pre-check for a friendlier error, but
/// the store rejects duplicates atomically regardless.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Case-insensitive email lookup, credential and refresh slot unloaded.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Case-insensitive email lookup including the password hash.
    async fn find_by_email_with_credential(&self, email: &str) -> AppResult<Option<Account>>;

    /// Primary-key lookup, credential and refresh slot unloaded.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Primary-key lookup including the current refresh token.
    async fn find_by_id_with_refresh_token(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Create a new account. Fails with `Conflict` if the email is taken.
    async fn create(&self, data: CreateAccount) -> AppResult<Account>;

    /// Overwrite (or clear, with `None`) the account's refresh-token slot.
    ///
    /// Targeted update: touches only the session slot, never re-validates
    /// the rest of the record.
    async fn store_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<()>;

    /// Record a successful login or registration time.
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()>;
}

pub use memory::MemoryIdentityStore;
pub use postgres::PgIdentityStore;
