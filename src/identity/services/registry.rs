//! Service layer for company and worker registration.
//!
//! Provides [`CompanyRegistry`] and [`WorkerRegistry`], which coordinate
//! registration, retirement, and the validity lookups consumed by the job
//! factory and the task registry.

use crate::identity::{
    domain::{
        AccountId, CompanyId, CompanyProfile, CompanyRegistration, IdentityDomainError, WorkerId,
        WorkerRegistration,
    },
    ports::{CompanyRepository, IdentityRepositoryError, WorkerRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for company registry operations.
#[derive(Debug, Error)]
pub enum CompanyRegistryError {
    /// No registration exists with the given identifier.
    #[error("company registration {0} does not exist")]
    RegistrationNotFound(CompanyId),
    /// Domain validation or lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
}

/// Result type for company registry operations.
pub type CompanyRegistryResult<T> = Result<T, CompanyRegistryError>;

/// Company registration and validity-lookup service.
#[derive(Clone)]
pub struct CompanyRegistry<R, C>
where
    R: CompanyRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CompanyRegistry<R, C>
where
    R: CompanyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new company registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers the calling account as a company.
    ///
    /// Each account may hold at most one registration.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::Domain`] when the profile fails
    /// validation, or [`CompanyRegistryError::Repository`] when the account
    /// is already registered or persistence fails.
    pub async fn register(
        &self,
        account: AccountId,
        name: impl Into<String> + Send,
        domain: impl Into<String> + Send,
    ) -> CompanyRegistryResult<CompanyRegistration> {
        let profile = CompanyProfile::new(name, domain)?;
        let id = self.repository.allocate_id().await?;
        let registration = CompanyRegistration::new(id, account, profile, &*self.clock);
        self.repository.insert(&registration).await?;
        Ok(registration)
    }

    /// Retires a registration; only the registrant may do so, and only once.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::RegistrationNotFound`] when the
    /// identifier is unknown, or [`CompanyRegistryError::Domain`] when the
    /// caller is not the registrant or the registration is already retired.
    pub async fn disable(
        &self,
        id: CompanyId,
        caller: &AccountId,
    ) -> CompanyRegistryResult<CompanyRegistration> {
        let mut registration = self.find_or_error(id).await?;
        registration.disable(caller, &*self.clock)?;
        self.repository.update(&registration).await?;
        Ok(registration)
    }

    /// Finds a registration by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn find(&self, id: CompanyId) -> CompanyRegistryResult<Option<CompanyRegistration>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the account registered under the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn address_of(&self, id: CompanyId) -> CompanyRegistryResult<Option<AccountId>> {
        let registration = self.repository.find_by_id(id).await?;
        Ok(registration.map(|reg| reg.account().clone()))
    }

    /// Returns the registration identifier held by the given account.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn id_by_address(
        &self,
        account: &AccountId,
    ) -> CompanyRegistryResult<Option<CompanyId>> {
        let registration = self.repository.find_by_account(account).await?;
        Ok(registration.map(|reg| reg.id()))
    }

    /// Returns whether a registration exists for the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_existing(&self, id: CompanyId) -> CompanyRegistryResult<bool> {
        Ok(self.repository.find_by_id(id).await?.is_some())
    }

    /// Returns whether the registration exists and is active.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_active(&self, id: CompanyId) -> CompanyRegistryResult<bool> {
        let registration = self.repository.find_by_id(id).await?;
        Ok(registration.is_some_and(|reg| reg.is_active()))
    }

    /// Returns whether the registration is valid (existing and active).
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_valid(&self, id: CompanyId) -> CompanyRegistryResult<bool> {
        self.is_active(id).await
    }

    /// Returns whether the account holds a valid (active) registration.
    ///
    /// # Errors
    ///
    /// Returns [`CompanyRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_valid_address(&self, account: &AccountId) -> CompanyRegistryResult<bool> {
        let registration = self.repository.find_by_account(account).await?;
        Ok(registration.is_some_and(|reg| reg.is_active()))
    }

    async fn find_or_error(&self, id: CompanyId) -> CompanyRegistryResult<CompanyRegistration> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CompanyRegistryError::RegistrationNotFound(id))
    }
}

/// Service-level errors for worker registry operations.
#[derive(Debug, Error)]
pub enum WorkerRegistryError {
    /// No registration exists with the given identifier.
    #[error("worker registration {0} does not exist")]
    RegistrationNotFound(WorkerId),
    /// Domain validation or lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
}

/// Result type for worker registry operations.
pub type WorkerRegistryResult<T> = Result<T, WorkerRegistryError>;

/// Worker registration and validity-lookup service.
#[derive(Clone)]
pub struct WorkerRegistry<R, C>
where
    R: WorkerRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> WorkerRegistry<R, C>
where
    R: WorkerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new worker registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers the calling account as a worker.
    ///
    /// Each account may hold at most one registration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::Repository`] when the account is
    /// already registered or persistence fails.
    pub async fn register(&self, account: AccountId) -> WorkerRegistryResult<WorkerRegistration> {
        let id = self.repository.allocate_id().await?;
        let registration = WorkerRegistration::new(id, account, &*self.clock);
        self.repository.insert(&registration).await?;
        Ok(registration)
    }

    /// Retires a registration; only the registrant may do so, and only once.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::RegistrationNotFound`] when the
    /// identifier is unknown, or [`WorkerRegistryError::Domain`] when the
    /// caller is not the registrant or the registration is already retired.
    pub async fn disable(
        &self,
        id: WorkerId,
        caller: &AccountId,
    ) -> WorkerRegistryResult<WorkerRegistration> {
        let mut registration = self.find_or_error(id).await?;
        registration.disable(caller, &*self.clock)?;
        self.repository.update(&registration).await?;
        Ok(registration)
    }

    /// Finds a registration by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn find(&self, id: WorkerId) -> WorkerRegistryResult<Option<WorkerRegistration>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the account registered under the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn address_of(&self, id: WorkerId) -> WorkerRegistryResult<Option<AccountId>> {
        let registration = self.repository.find_by_id(id).await?;
        Ok(registration.map(|reg| reg.account().clone()))
    }

    /// Returns the registration identifier held by the given account.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn id_by_address(
        &self,
        account: &AccountId,
    ) -> WorkerRegistryResult<Option<WorkerId>> {
        let registration = self.repository.find_by_account(account).await?;
        Ok(registration.map(|reg| reg.id()))
    }

    /// Returns whether a registration exists for the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_existing(&self, id: WorkerId) -> WorkerRegistryResult<bool> {
        Ok(self.repository.find_by_id(id).await?.is_some())
    }

    /// Returns whether the registration exists and is active.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_active(&self, id: WorkerId) -> WorkerRegistryResult<bool> {
        let registration = self.repository.find_by_id(id).await?;
        Ok(registration.is_some_and(|reg| reg.is_active()))
    }

    /// Returns whether the registration is valid (existing and active).
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_valid(&self, id: WorkerId) -> WorkerRegistryResult<bool> {
        self.is_active(id).await
    }

    /// Returns whether the account holds a valid (active) registration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_valid_address(&self, account: &AccountId) -> WorkerRegistryResult<bool> {
        let registration = self.repository.find_by_account(account).await?;
        Ok(registration.is_some_and(|reg| reg.is_active()))
    }

    async fn find_or_error(&self, id: WorkerId) -> WorkerRegistryResult<WorkerRegistration> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(WorkerRegistryError::RegistrationNotFound(id))
    }
}
