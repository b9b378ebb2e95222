//! Worker directory port.
//!
//! The task registry consumes exactly one capability from the worker
//! identity registry: whether an account is a currently-active registered
//! worker. The port keeps the registry pluggable and the dependency
//! one-directional.

use crate::identity::domain::AccountId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for worker directory lookups.
pub type WorkerDirectoryResult<T> = Result<T, WorkerDirectoryError>;

/// Active-worker lookup contract.
#[async_trait]
pub trait WorkerDirectory: Send + Sync {
    /// Returns whether the account holds an active worker registration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerDirectoryError`] when the underlying registry cannot
    /// be queried.
    async fn is_active_worker(&self, account: &AccountId) -> WorkerDirectoryResult<bool>;
}

/// Failure while querying the worker directory.
#[derive(Debug, Clone, Error)]
#[error("worker directory lookup failed: {0}")]
pub struct WorkerDirectoryError(Arc<dyn std::error::Error + Send + Sync>);

impl WorkerDirectoryError {
    /// Wraps an underlying registry error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
