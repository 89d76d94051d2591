//! # medipass-entity
//!
//! Domain entity models for the MediPass authentication service. Every
//! struct in this crate represents a database table row or a domain value
//! object. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and database entities additionally derive
//! `sqlx::FromRow`.

pub mod account;

pub use account::{Account, AccountStatus, CreateAccount, Role};
