//! Calling-identity account identifier.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a caller: a platform operator, a company, a worker, or a
/// job's escrow holder.
///
/// Accounts are opaque non-empty strings. The embedding is responsible for
/// authenticating that a call really originates from the account it names;
/// the core only compares account identities for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account identifier from a non-empty string.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyAccountId`] when the input is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyAccountId);
        }
        Ok(Self(trimmed))
    }

    /// Returns the account identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
