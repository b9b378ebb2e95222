//! Event log port for the task registry's audit trail.

use crate::task::domain::{TaskEvent, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event log operations.
pub type TaskEventLogResult<T> = Result<T, TaskEventLogError>;

/// Append-only task event log contract.
///
/// Events are appended in the order mutations commit and are never
/// rewritten.
#[async_trait]
pub trait TaskEventLog: Send + Sync {
    /// Appends an event to the log.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventLogError`] when the log cannot be appended to.
    async fn record(&self, event: TaskEvent) -> TaskEventLogResult<()>;

    /// Returns all events recorded for a task, oldest first.
    async fn for_task(&self, task_id: TaskId) -> TaskEventLogResult<Vec<TaskEvent>>;

    /// Returns every recorded event, oldest first.
    async fn all(&self) -> TaskEventLogResult<Vec<TaskEvent>>;
}

/// Failure while reading or appending the task event log.
#[derive(Debug, Clone, Error)]
#[error("task event log failure: {0}")]
pub struct TaskEventLogError(Arc<dyn std::error::Error + Send + Sync>);

impl TaskEventLogError {
    /// Wraps an underlying storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
