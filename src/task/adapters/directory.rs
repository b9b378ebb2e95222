//! Worker directory adapter backed by the worker identity registry.

use crate::identity::{ports::WorkerRepository, services::WorkerRegistry};
use crate::identity::domain::AccountId;
use crate::task::ports::{WorkerDirectory, WorkerDirectoryError, WorkerDirectoryResult};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

/// [`WorkerDirectory`] implementation that consults the worker registry
/// service.
#[derive(Clone)]
pub struct RegistryWorkerDirectory<R, C>
where
    R: WorkerRepository,
    C: Clock + Send + Sync,
{
    registry: Arc<WorkerRegistry<R, C>>,
}

impl<R, C> RegistryWorkerDirectory<R, C>
where
    R: WorkerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a directory over the given worker registry.
    #[must_use]
    pub const fn new(registry: Arc<WorkerRegistry<R, C>>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl<R, C> WorkerDirectory for RegistryWorkerDirectory<R, C>
where
    R: WorkerRepository,
    C: Clock + Send + Sync,
{
    async fn is_active_worker(&self, account: &AccountId) -> WorkerDirectoryResult<bool> {
        self.registry
            .is_valid_address(account)
            .await
            .map_err(WorkerDirectoryError::lookup)
    }
}
