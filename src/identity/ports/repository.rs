//! Repository ports for registration persistence and address lookup.

use crate::identity::domain::{
    AccountId, CompanyId, CompanyRegistration, WorkerId, WorkerRegistration,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity repository operations.
pub type IdentityRepositoryResult<T> = Result<T, IdentityRepositoryError>;

/// Company registration persistence contract.
///
/// Implementations must apply each call atomically: identifier allocation
/// never hands out the same id twice, and inserts reject an account that
/// already holds a registration.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Allocates the next company identifier.
    ///
    /// Identifiers are monotonically increasing from 1 and are never
    /// reused, even when the corresponding insert later fails.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::Persistence`] when the store
    /// cannot allocate.
    async fn allocate_id(&self) -> IdentityRepositoryResult<CompanyId>;

    /// Stores a new company registration.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::DuplicateAccount`] when the
    /// account already holds a registration.
    async fn insert(&self, registration: &CompanyRegistration) -> IdentityRepositoryResult<()>;

    /// Persists changes to an existing registration (status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::NotFound`] when no registration
    /// is stored for the registration's account.
    async fn update(&self, registration: &CompanyRegistration) -> IdentityRepositoryResult<()>;

    /// Finds a registration by identifier.
    ///
    /// Returns `None` when the identifier is unknown.
    async fn find_by_id(&self, id: CompanyId)
    -> IdentityRepositoryResult<Option<CompanyRegistration>>;

    /// Finds a registration by account.
    ///
    /// Returns `None` when the account holds no registration.
    async fn find_by_account(
        &self,
        account: &AccountId,
    ) -> IdentityRepositoryResult<Option<CompanyRegistration>>;
}

/// Worker registration persistence contract.
///
/// Mirrors [`CompanyRepository`] for worker records.
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    /// Allocates the next worker identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::Persistence`] when the store
    /// cannot allocate.
    async fn allocate_id(&self) -> IdentityRepositoryResult<WorkerId>;

    /// Stores a new worker registration.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::DuplicateAccount`] when the
    /// account already holds a registration.
    async fn insert(&self, registration: &WorkerRegistration) -> IdentityRepositoryResult<()>;

    /// Persists changes to an existing registration (status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::NotFound`] when no registration
    /// is stored for the registration's account.
    async fn update(&self, registration: &WorkerRegistration) -> IdentityRepositoryResult<()>;

    /// Finds a registration by identifier.
    ///
    /// Returns `None` when the identifier is unknown.
    async fn find_by_id(&self, id: WorkerId)
    -> IdentityRepositoryResult<Option<WorkerRegistration>>;

    /// Finds a registration by account.
    ///
    /// Returns `None` when the account holds no registration.
    async fn find_by_account(
        &self,
        account: &AccountId,
    ) -> IdentityRepositoryResult<Option<WorkerRegistration>>;
}

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityRepositoryError {
    /// The account already holds a registration.
    #[error("account {0} is already registered")]
    DuplicateAccount(AccountId),

    /// No registration is stored for the account.
    #[error("no registration stored for account {0}")]
    NotFound(AccountId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
