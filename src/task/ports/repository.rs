//! Repository port for task persistence, lookup, and conditional updates.

use crate::identity::domain::AccountId;
use crate::job::domain::JobId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// This is the contract a durable transactional store must honor. Each call
/// is atomic, and `update` is conditional on the revision the caller read:
/// a task modified in between fails with
/// [`TaskRepositoryError::RevisionConflict`], which lets the registry
/// serialize racing mutations per task without ever double-committing.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Allocates the next task identifier.
    ///
    /// Identifiers are monotonically increasing from 1 and are never
    /// reused, even when the corresponding insert later fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store cannot
    /// allocate.
    async fn allocate_id(&self) -> TaskRepositoryResult<TaskId>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task if its stored revision still
    /// matches the revision the caller read.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::RevisionConflict`] when the stored
    /// revision has moved on.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks created by the given job, in creation order.
    async fn find_by_owning_job(&self, job: JobId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks currently assigned to the worker and not yet
    /// complete, in creation order.
    async fn find_active_by_assignee(&self, worker: &AccountId)
    -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task was modified between read and update.
    #[error("task {0} was modified concurrently")]
    RevisionConflict(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
