//! Error types for job domain validation and lifecycle rules.

use super::JobId;
use crate::identity::domain::AccountId;
use crate::ledger::domain::Funds;
use crate::task::domain::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating job domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobDomainError {
    /// The job title is empty after trimming.
    #[error("job title must not be empty")]
    EmptyJobTitle,

    /// The caller is not the company that owns the job.
    #[error("caller {caller} is not the job owner")]
    NotJobOwner {
        /// The job being operated on.
        job_id: JobId,
        /// The identity that made the call.
        caller: AccountId,
    },

    /// The job is complete; no more changes can be made.
    #[error("job {0} is already complete, no more changes can be made")]
    JobAlreadyComplete(JobId),

    /// The task does not belong to the job.
    #[error("task {task_id} is not a task of job {job_id}")]
    NotJobTask {
        /// The job being operated on.
        job_id: JobId,
        /// The task that was referenced.
        task_id: TaskId,
    },

    /// The caller holds no active assignment under the job.
    #[error("caller {caller} is not a collaborator on job {job_id}")]
    NotCollaborator {
        /// The job being operated on.
        job_id: JobId,
        /// The identity that made the call.
        caller: AccountId,
    },

    /// The funds provided do not exactly match the task's compensation.
    #[error("provided funds {provided} do not match the compensation of {expected}")]
    WrongCompensation {
        /// The compensation declared for the task.
        expected: Funds,
        /// The funds the caller provided.
        provided: Funds,
    },

    /// At least one task of the job is not yet complete.
    #[error("not all tasks of job {0} are complete")]
    TasksIncomplete(JobId),

    /// Escrowing the funds would overflow the job's balance.
    #[error("escrow balance overflow on job {0}")]
    EscrowOverflow(JobId),

    /// Releasing the funds would take the job's balance below zero.
    #[error("escrow balance underflow on job {0}")]
    EscrowUnderflow(JobId),
}

/// Error returned while parsing job status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);
