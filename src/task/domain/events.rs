//! Domain events recorded by the task registry.

use super::{Evidence, TaskId};
use crate::identity::domain::AccountId;
use crate::job::domain::JobId;
use crate::ledger::domain::Funds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event appended to the task event log after a successful registry
/// mutation.
///
/// Events are the registry's audit trail: embedders can replay who was
/// assigned what, which approvals paid out, and when evidence bounced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A task was created under an owning job.
    Created {
        /// The new task.
        task_id: TaskId,
        /// The job that created and owns the task.
        owning_job: JobId,
        /// The compensation fixed at creation.
        compensation: Funds,
        /// When the event occurred.
        at: DateTime<Utc>,
    },
    /// A task was assigned to a worker.
    Assigned {
        /// The task.
        task_id: TaskId,
        /// The worker now responsible for the task.
        assigned_to: AccountId,
        /// When the event occurred.
        at: DateTime<Utc>,
    },
    /// A task moved from one worker to another.
    Reassigned {
        /// The task.
        task_id: TaskId,
        /// The worker previously responsible, if any.
        previous: Option<AccountId>,
        /// The worker now responsible.
        assigned_to: AccountId,
        /// When the event occurred.
        at: DateTime<Utc>,
    },
    /// The assignee submitted evidence for review.
    EvidenceSubmitted {
        /// The task.
        task_id: TaskId,
        /// The submitted evidence.
        evidence: Evidence,
        /// When the event occurred.
        at: DateTime<Utc>,
    },
    /// The task was approved and completed.
    Approved {
        /// The task.
        task_id: TaskId,
        /// The worker whose work was approved.
        assigned_to: AccountId,
        /// The identity that endorsed the work.
        endorsed_by: AccountId,
        /// When the event occurred.
        at: DateTime<Utc>,
    },
    /// Submitted evidence was rejected and cleared.
    EvidenceRejected {
        /// The task.
        task_id: TaskId,
        /// The worker whose evidence was rejected.
        assigned_to: AccountId,
        /// The identity that rejected the evidence.
        rejected_by: AccountId,
        /// When the event occurred.
        at: DateTime<Utc>,
    },
}

impl TaskEvent {
    /// Returns the task the event concerns.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Created { task_id, .. }
            | Self::Assigned { task_id, .. }
            | Self::Reassigned { task_id, .. }
            | Self::EvidenceSubmitted { task_id, .. }
            | Self::Approved { task_id, .. }
            | Self::EvidenceRejected { task_id, .. } => *task_id,
        }
    }

    /// Returns when the event occurred.
    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Created { at, .. }
            | Self::Assigned { at, .. }
            | Self::Reassigned { at, .. }
            | Self::EvidenceSubmitted { at, .. }
            | Self::Approved { at, .. }
            | Self::EvidenceRejected { at, .. } => *at,
        }
    }
}
