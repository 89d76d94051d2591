//! Account entity and its enumerations.

pub mod model;
pub mod role;
pub mod status;

pub use model::{Account, CreateAccount};
pub use role::Role;
pub use status::AccountStatus;
