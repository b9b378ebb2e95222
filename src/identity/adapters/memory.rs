//! In-memory repositories for identity registration tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{AccountId, CompanyId, CompanyRegistration, WorkerId, WorkerRegistration},
    ports::{
        CompanyRepository, IdentityRepositoryError, IdentityRepositoryResult, WorkerRepository,
    },
};

fn poison(err: impl std::fmt::Display) -> IdentityRepositoryError {
    IdentityRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory company registration repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompanyRepository {
    state: Arc<RwLock<CompanyState>>,
}

#[derive(Debug, Default)]
struct CompanyState {
    last_id: u64,
    registrations: HashMap<CompanyId, CompanyRegistration>,
    account_index: HashMap<AccountId, CompanyId>,
}

impl InMemoryCompanyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn allocate_id(&self) -> IdentityRepositoryResult<CompanyId> {
        let mut state = self.state.write().map_err(poison)?;
        state.last_id += 1;
        Ok(CompanyId::new(state.last_id))
    }

    async fn insert(&self, registration: &CompanyRegistration) -> IdentityRepositoryResult<()> {
        let mut state = self.state.write().map_err(poison)?;
        if state.account_index.contains_key(registration.account()) {
            return Err(IdentityRepositoryError::DuplicateAccount(
                registration.account().clone(),
            ));
        }
        state
            .account_index
            .insert(registration.account().clone(), registration.id());
        state
            .registrations
            .insert(registration.id(), registration.clone());
        Ok(())
    }

    async fn update(&self, registration: &CompanyRegistration) -> IdentityRepositoryResult<()> {
        let mut state = self.state.write().map_err(poison)?;
        if !state.registrations.contains_key(&registration.id()) {
            return Err(IdentityRepositoryError::NotFound(
                registration.account().clone(),
            ));
        }
        state
            .registrations
            .insert(registration.id(), registration.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: CompanyId,
    ) -> IdentityRepositoryResult<Option<CompanyRegistration>> {
        let state = self.state.read().map_err(poison)?;
        Ok(state.registrations.get(&id).cloned())
    }

    async fn find_by_account(
        &self,
        account: &AccountId,
    ) -> IdentityRepositoryResult<Option<CompanyRegistration>> {
        let state = self.state.read().map_err(poison)?;
        let registration = state
            .account_index
            .get(account)
            .and_then(|id| state.registrations.get(id))
            .cloned();
        Ok(registration)
    }
}

/// Thread-safe in-memory worker registration repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkerRepository {
    state: Arc<RwLock<WorkerState>>,
}

#[derive(Debug, Default)]
struct WorkerState {
    last_id: u64,
    registrations: HashMap<WorkerId, WorkerRegistration>,
    account_index: HashMap<AccountId, WorkerId>,
}

impl InMemoryWorkerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkerRepository for InMemoryWorkerRepository {
    async fn allocate_id(&self) -> IdentityRepositoryResult<WorkerId> {
        let mut state = self.state.write().map_err(poison)?;
        state.last_id += 1;
        Ok(WorkerId::new(state.last_id))
    }

    async fn insert(&self, registration: &WorkerRegistration) -> IdentityRepositoryResult<()> {
        let mut state = self.state.write().map_err(poison)?;
        if state.account_index.contains_key(registration.account()) {
            return Err(IdentityRepositoryError::DuplicateAccount(
                registration.account().clone(),
            ));
        }
        state
            .account_index
            .insert(registration.account().clone(), registration.id());
        state
            .registrations
            .insert(registration.id(), registration.clone());
        Ok(())
    }

    async fn update(&self, registration: &WorkerRegistration) -> IdentityRepositoryResult<()> {
        let mut state = self.state.write().map_err(poison)?;
        if !state.registrations.contains_key(&registration.id()) {
            return Err(IdentityRepositoryError::NotFound(
                registration.account().clone(),
            ));
        }
        state
            .registrations
            .insert(registration.id(), registration.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: WorkerId,
    ) -> IdentityRepositoryResult<Option<WorkerRegistration>> {
        let state = self.state.read().map_err(poison)?;
        Ok(state.registrations.get(&id).cloned())
    }

    async fn find_by_account(
        &self,
        account: &AccountId,
    ) -> IdentityRepositoryResult<Option<WorkerRegistration>> {
        let state = self.state.read().map_err(poison)?;
        let registration = state
            .account_index
            .get(account)
            .and_then(|id| state.registrations.get(id))
            .cloned();
        Ok(registration)
    }
}
