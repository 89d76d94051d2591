//! # medipass-api
//!
//! HTTP API layer for the MediPass authentication service: the Axum
//! router, request/response DTOs, and the `AuthUser` extractor.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use state::AppState;
