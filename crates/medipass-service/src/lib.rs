//! # medipass-service
//!
//! Business logic for the MediPass authentication service: the
//! [`auth::AuthService`] orchestrator and the [`context::RequestContext`]
//! identity context handed to authenticated operations.

pub mod auth;
pub mod context;

pub use auth::AuthService;
pub use context::RequestContext;
