//! Company directory adapter backed by the company identity registry.

use crate::identity::domain::AccountId;
use crate::identity::{ports::CompanyRepository, services::CompanyRegistry};
use crate::job::ports::{CompanyDirectory, CompanyDirectoryError, CompanyDirectoryResult};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

/// [`CompanyDirectory`] implementation that consults the company registry
/// service.
#[derive(Clone)]
pub struct RegistryCompanyDirectory<R, C>
where
    R: CompanyRepository,
    C: Clock + Send + Sync,
{
    registry: Arc<CompanyRegistry<R, C>>,
}

impl<R, C> RegistryCompanyDirectory<R, C>
where
    R: CompanyRepository,
    C: Clock + Send + Sync,
{
    /// Creates a directory over the given company registry.
    #[must_use]
    pub const fn new(registry: Arc<CompanyRegistry<R, C>>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl<R, C> CompanyDirectory for RegistryCompanyDirectory<R, C>
where
    R: CompanyRepository,
    C: Clock + Send + Sync,
{
    async fn is_active_company(&self, account: &AccountId) -> CompanyDirectoryResult<bool> {
        self.registry
            .is_valid_address(account)
            .await
            .map_err(CompanyDirectoryError::lookup)
    }
}
