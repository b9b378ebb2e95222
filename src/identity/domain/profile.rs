//! Company profile metadata.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};

/// Descriptive metadata recorded with a company registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    name: String,
    domain: String,
}

impl CompanyProfile {
    /// Creates a profile from a company name and web domain.
    ///
    /// Both values are trimmed and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyCompanyName`] or
    /// [`IdentityDomainError::EmptyCompanyDomain`] when the respective value
    /// is empty after trimming.
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        let trimmed_name = name.into().trim().to_owned();
        if trimmed_name.is_empty() {
            return Err(IdentityDomainError::EmptyCompanyName);
        }
        let trimmed_domain = domain.into().trim().to_owned();
        if trimmed_domain.is_empty() {
            return Err(IdentityDomainError::EmptyCompanyDomain);
        }
        Ok(Self {
            name: trimmed_name,
            domain: trimmed_domain,
        })
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the company web domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }
}
