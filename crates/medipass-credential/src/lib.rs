//! # medipass-credential
//!
//! Stateless credential primitives for the MediPass authentication
//! service.
//!
//! ## Modules
//!
//! - `jwt` — access/refresh token signing and verification
//! - `password` — Argon2id password hashing and policy enforcement

pub mod jwt;
pub mod password;

pub use jwt::{AccessClaims, RefreshClaims, TokenService};
pub use password::{PasswordHasher, PasswordValidator};
