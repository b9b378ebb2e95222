//! Error types for task domain validation and lifecycle rules.

use super::TaskId;
use crate::identity::domain::AccountId;
use crate::job::domain::JobId;
use thiserror::Error;

/// Errors returned while constructing or transitioning task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The submitted evidence is empty after trimming.
    #[error("evidence must not be empty")]
    EmptyEvidence,

    /// The caller is not the job that created the task.
    #[error("caller {caller} is not the owner of task {task_id}")]
    NotTaskOwner {
        /// The task being operated on.
        task_id: TaskId,
        /// The job identity that made the call.
        caller: JobId,
    },

    /// The task has been completed and approved; no more changes can be
    /// made.
    #[error("task {0} has been completed and approved, no more changes can be made")]
    TaskAlreadyComplete(TaskId),

    /// The task is already assigned to someone.
    #[error("task {0} is already assigned to someone")]
    TaskAlreadyAssigned(TaskId),

    /// The task cannot be reassigned while submitted evidence awaits
    /// review.
    #[error("cannot reassign task {0} with pending evidence")]
    EvidencePending(TaskId),

    /// The task cannot be reassigned to its current assignee.
    #[error("cannot reassign task {0} to the same worker")]
    SameWorker(TaskId),

    /// The submitter is not the worker currently assigned to the task.
    #[error("{submitter} is not assigned to task {task_id}")]
    NotAssignee {
        /// The task being operated on.
        task_id: TaskId,
        /// The identity that attempted the submission.
        submitter: AccountId,
    },

    /// No evidence has been submitted for the task.
    #[error("no evidence submitted for task {0}")]
    NoEvidence(TaskId),
}
