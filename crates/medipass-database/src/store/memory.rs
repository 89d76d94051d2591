//! In-memory identity store using a Tokio lock, for single-node use and
//! tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use medipass_core::error::AppError;
use medipass_core::result::AppResult;
use medipass_entity::account::{Account, CreateAccount};

use super::IdentityStore;

/// Internal state for the memory-based identity store.
#[derive(Debug, Default)]
struct InnerState {
    /// Accounts keyed by id.
    accounts: HashMap<Uuid, Account>,
    /// Lowercased email → account id index.
    email_index: HashMap<String, Uuid>,
}

/// In-memory identity store.
///
/// The duplicate-email check and the insert happen under one exclusive
/// lock, so uniqueness holds without a separate pre-check.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryIdentityStore {
    /// Creates a new, empty in-memory identity store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Strips the fields a lookup did not opt in to.
fn project(account: &Account, with_credential: bool, with_refresh_token: bool) -> Account {
    let mut projected = account.clone();
    if !with_credential {
        projected.password_hash = None;
    }
    if !with_refresh_token {
        projected.current_refresh_token = None;
    }
    projected
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .email_index
            .get(&email.to_lowercase())
            .and_then(|id| state.accounts.get(id))
            .map(|a| project(a, false, false)))
    }

    async fn find_by_email_with_credential(&self, email: &str) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state
            .email_index
            .get(&email.to_lowercase())
            .and_then(|id| state.accounts.get(id))
            .map(|a| project(a, true, false)))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).map(|a| project(a, false, false)))
    }

    async fn find_by_id_with_refresh_token(&self, id: Uuid) -> AppResult<Option<Account>> {
        let state = self.state.read().await;
        Ok(state.accounts.get(&id).map(|a| project(a, false, true)))
    }

    async fn create(&self, data: CreateAccount) -> AppResult<Account> {
        let mut state = self.state.write().await;
        let email = data.email.to_lowercase();

        if state.email_index.contains_key(&email) {
            return Err(AppError::conflict("Account with this email already exists"));
        }

        let account = Account {
            id: Uuid::new_v4(),
            email: email.clone(),
            password_hash: Some(data.password_hash),
            first_name: data.first_name,
            last_name: data.last_name,
            roles: data.roles,
            status: data.status,
            current_refresh_token: None,
            last_login_at: None,
            created_at: Utc::now(),
        };

        state.email_index.insert(email, account.id);
        state.accounts.insert(account.id, account.clone());
        debug!(account_id = %account.id, "Account created in memory store");

        Ok(account)
    }

    async fn store_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<()> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        account.current_refresh_token = token.map(String::from);
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let mut state = self.state.write().await;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        account.last_login_at = Some(at);
        Ok(())
    }
}
