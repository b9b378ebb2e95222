//! In-memory repository for job lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::AccountId;
use crate::job::{
    domain::{Job, JobId},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};

/// Thread-safe in-memory job repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    state: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl InMemoryJobRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poison(err: impl std::fmt::Display) -> JobRepositoryError {
    JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: &Job) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(poison)?;
        if state.contains_key(&job.id()) {
            return Err(JobRepositoryError::DuplicateJob(job.id()));
        }
        state.insert(job.id(), job.clone());
        Ok(())
    }

    async fn update(&self, job: &Job) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(poison)?;
        if !state.contains_key(&job.id()) {
            return Err(JobRepositoryError::NotFound(job.id()));
        }
        state.insert(job.id(), job.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        let state = self.state.read().map_err(poison)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: &AccountId) -> JobRepositoryResult<Vec<Job>> {
        let state = self.state.read().map_err(poison)?;
        let mut jobs: Vec<Job> = state
            .values()
            .filter(|job| job.owner() == owner)
            .cloned()
            .collect();
        jobs.sort_by_key(Job::created_at);
        Ok(jobs)
    }
}
