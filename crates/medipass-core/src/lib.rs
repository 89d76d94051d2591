//! # medipass-core
//!
//! Core crate for the MediPass authentication service. Contains the
//! configuration schemas and the unified error system.
//!
//! This crate has **no** internal dependencies on other MediPass crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
