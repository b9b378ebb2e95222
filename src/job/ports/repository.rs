//! Repository port for job persistence and lookup.

use crate::identity::domain::AccountId;
use crate::job::domain::{Job, JobId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job repository operations.
pub type JobRepositoryResult<T> = Result<T, JobRepositoryError>;

/// Job persistence contract.
///
/// Each call is atomic. The orchestration service serializes mutations per
/// job before calling `update`, so the contract itself needs no
/// conditional-update handshake.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Stores a new job.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::DuplicateJob`] when the job ID already
    /// exists.
    async fn insert(&self, job: &Job) -> JobRepositoryResult<()>;

    /// Persists changes to an existing job (status, tasks, collaborators,
    /// escrow, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::NotFound`] when the job does not
    /// exist.
    async fn update(&self, job: &Job) -> JobRepositoryResult<()>;

    /// Finds a job by identifier.
    ///
    /// Returns `None` when the job does not exist.
    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>>;

    /// Returns all jobs owned by the given company identity, oldest first.
    async fn list_by_owner(&self, owner: &AccountId) -> JobRepositoryResult<Vec<Job>>;
}

/// Errors returned by job repository implementations.
#[derive(Debug, Clone, Error)]
pub enum JobRepositoryError {
    /// A job with the same identifier already exists.
    #[error("duplicate job identifier: {0}")]
    DuplicateJob(JobId),

    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
