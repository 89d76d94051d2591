//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles assignable to an account.
///
/// An account holds a non-empty set of roles. Registration without an
/// explicit role set falls back to [`Role::Patient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full system administrator.
    Admin,
    /// Practicing physician.
    Doctor,
    /// Nursing staff.
    Nurse,
    /// Patient — the baseline role for self-registration.
    Patient,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
            Self::Patient => "patient",
        }
    }

    /// The default role set applied when registration supplies none.
    pub fn default_set() -> Vec<Role> {
        vec![Role::Patient]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = medipass_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "nurse" => Ok(Self::Nurse),
            "patient" => Ok(Self::Patient),
            _ => Err(medipass_core::AppError::validation(format!(
                "Invalid account role: '{s}'. Expected one of: admin, doctor, nurse, patient"
            ))),
        }
    }
}
