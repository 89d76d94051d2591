//! JWT token signing, verification, and claims management.

pub mod claims;
pub mod service;

pub use claims::{AccessClaims, RefreshClaims};
pub use service::TokenService;
