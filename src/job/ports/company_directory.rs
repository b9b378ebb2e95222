//! Company directory port.
//!
//! The job factory consumes exactly one capability from the company
//! identity registry: whether an account is a currently-active registered
//! company.

use crate::identity::domain::AccountId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for company directory lookups.
pub type CompanyDirectoryResult<T> = Result<T, CompanyDirectoryError>;

/// Active-company lookup contract.
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    /// Returns whether the account holds an active company registration.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyDirectoryError`] when the underlying registry
    /// cannot be queried.
    async fn is_active_company(&self, account: &AccountId) -> CompanyDirectoryResult<bool>;
}

/// Failure while querying the company directory.
#[derive(Debug, Clone, Error)]
#[error("company directory lookup failed: {0}")]
pub struct CompanyDirectoryError(Arc<dyn std::error::Error + Send + Sync>);

impl CompanyDirectoryError {
    /// Wraps an underlying registry error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
