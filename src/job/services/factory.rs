//! Service layer for job creation.
//!
//! Provides [`JobFactory`], the thin gate between the company registry and
//! the job store: only an account holding an active company registration
//! may deploy a new job.

use crate::identity::domain::AccountId;
use crate::job::{
    domain::{Job, JobDetails, JobDomainError, JobId},
    ports::{CompanyDirectory, CompanyDirectoryError, JobRepository, JobRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateJobRequest {
    title: String,
    description: String,
}

impl CreateJobRequest {
    /// Creates a request with the job's immutable fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Service-level errors for job creation.
#[derive(Debug, Error)]
pub enum JobFactoryError {
    /// The creator holds no active company registration.
    #[error("{0} does not hold an active company registration")]
    UnregisteredCompany(AccountId),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] JobDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
    /// Company directory lookup failed.
    #[error(transparent)]
    Directory(#[from] CompanyDirectoryError),
}

/// Result type for job factory operations.
pub type JobFactoryResult<T> = Result<T, JobFactoryError>;

/// Company-gated job creation service.
#[derive(Clone)]
pub struct JobFactory<J, C>
where
    J: JobRepository,
    C: Clock + Send + Sync,
{
    jobs: Arc<J>,
    companies: Arc<dyn CompanyDirectory>,
    clock: Arc<C>,
}

impl<J, C> JobFactory<J, C>
where
    J: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new job factory.
    #[must_use]
    pub fn new(jobs: Arc<J>, companies: Arc<dyn CompanyDirectory>, clock: Arc<C>) -> Self {
        Self {
            jobs,
            companies,
            clock,
        }
    }

    /// Deploys a new job owned by `owner`.
    ///
    /// The returned aggregate is the deployment record: it carries the
    /// job's identifier, owner, and immutable metadata.
    ///
    /// # Errors
    ///
    /// Returns [`JobFactoryError::UnregisteredCompany`] when the owner
    /// holds no active company registration,
    /// [`JobFactoryError::Domain`] when the request fails validation, or
    /// [`JobFactoryError::Repository`] when persistence fails.
    pub async fn create_job(
        &self,
        owner: AccountId,
        request: CreateJobRequest,
    ) -> JobFactoryResult<Job> {
        if !self.companies.is_active_company(&owner).await? {
            return Err(JobFactoryError::UnregisteredCompany(owner));
        }
        let CreateJobRequest { title, description } = request;
        let details = JobDetails::new(title, description)?;
        let job = Job::new(JobId::new(), owner, details, &*self.clock);
        self.jobs.insert(&job).await?;
        Ok(job)
    }

    /// Returns all jobs deployed by the given company identity.
    ///
    /// # Errors
    ///
    /// Returns [`JobFactoryError::Repository`] when persistence lookup
    /// fails.
    pub async fn jobs_for_company(&self, owner: &AccountId) -> JobFactoryResult<Vec<Job>> {
        Ok(self.jobs.list_by_owner(owner).await?)
    }
}
