//! Registration lifecycle status.

use super::ParseRegistrationStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an identity registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// The registration is in good standing.
    Active,
    /// The registrant has retired the registration; it is excluded from
    /// validity checks but the record remains on file.
    Inactive,
}

impl RegistrationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RegistrationStatus {
    type Error = ParseRegistrationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseRegistrationStatusError(value.to_owned())),
        }
    }
}
