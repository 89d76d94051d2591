//! PostgreSQL identity store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use medipass_core::error::{AppError, ErrorKind};
use medipass_core::result::AppResult;
use medipass_entity::account::{Account, CreateAccount};

use super::IdentityStore;

/// Columns selected by the default (credential-free) lookups. The
/// password hash and refresh-token slot come back as NULL unless a
/// caller opts in via the dedicated variants.
const BASE_COLUMNS: &str = "id, email, NULL::TEXT AS password_hash, first_name, last_name, \
     roles, status, NULL::TEXT AS current_refresh_token, last_login_at, created_at";

/// Identity store backed by the `accounts` table.
///
/// Email uniqueness is guaranteed by the `accounts_email_key` unique
/// index on `LOWER(email)`; a violation surfaces as `Conflict`.
#[derive(Debug, Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    /// Create a new PostgreSQL-backed identity store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {BASE_COLUMNS} FROM accounts WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
        })
    }

    async fn find_by_email_with_credential(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, first_name, last_name, roles, status, \
                    NULL::TEXT AS current_refresh_token, last_login_at, created_at \
             FROM accounts WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {BASE_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account by id", e))
    }

    async fn find_by_id_with_refresh_token(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT id, email, NULL::TEXT AS password_hash, first_name, last_name, roles, \
                    status, current_refresh_token, last_login_at, created_at \
             FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account by id", e))
    }

    async fn create(&self, data: CreateAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (email, password_hash, first_name, last_name, roles, status) \
             VALUES (LOWER($1), $2, $3, $4, $5, $6) \
             RETURNING id, email, password_hash, first_name, last_name, roles, status, \
                       current_refresh_token, last_login_at, created_at",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.roles)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("accounts_email_key") =>
            {
                AppError::conflict("Account with this email already exists")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create account", e),
        })
    }

    async fn store_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<()> {
        let result = sqlx::query("UPDATE accounts SET current_refresh_token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to store refresh token", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Account {id} not found")));
        }
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        let result = sqlx::query("UPDATE accounts SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to record login time", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Account {id} not found")));
        }
        Ok(())
    }
}
