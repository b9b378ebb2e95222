//! Task aggregate root and its lifecycle transitions.

use super::{Evidence, TaskDomainError, TaskId};
use crate::identity::domain::AccountId;
use crate::job::domain::JobId;
use crate::ledger::domain::Funds;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated creation parameters for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    title: String,
    description: String,
    compensation: Funds,
}

impl TaskDetails {
    /// Creates task details from a title, description, and compensation.
    ///
    /// The title is trimmed and must be non-empty; the description may be
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        compensation: Funds,
    ) -> Result<Self, TaskDomainError> {
        let trimmed_title = title.into().trim().to_owned();
        if trimmed_title.is_empty() {
            return Err(TaskDomainError::EmptyTaskTitle);
        }
        Ok(Self {
            title: trimmed_title,
            description: description.into(),
            compensation,
        })
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the compensation.
    #[must_use]
    pub const fn compensation(&self) -> Funds {
        self.compensation
    }
}

/// Task aggregate root.
///
/// A task is created under exactly one owning job and only that job's
/// identity may drive it through its lifecycle. Once `is_complete` is set
/// the task is immutable; every transition method re-checks this first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owning_job: JobId,
    title: String,
    description: String,
    compensation: Funds,
    candidates: Vec<AccountId>,
    assignee: Option<AccountId>,
    evidence: Option<Evidence>,
    endorsed_by: Option<AccountId>,
    is_complete: bool,
    revision: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task owned by `owning_job`.
    #[must_use]
    pub fn new(id: TaskId, owning_job: JobId, details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let TaskDetails {
            title,
            description,
            compensation,
        } = details;
        Self {
            id,
            owning_job,
            title,
            description,
            compensation,
            candidates: Vec::new(),
            assignee: None,
            evidence: None,
            endorsed_by: None,
            is_complete: false,
            revision: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the identity of the job that owns the task.
    #[must_use]
    pub const fn owning_job(&self) -> JobId {
        self.owning_job
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the compensation fixed at creation.
    #[must_use]
    pub const fn compensation(&self) -> Funds {
        self.compensation
    }

    /// Returns the workers who applied for the task, in application order.
    ///
    /// Re-applications are kept as-is; the list is deliberately
    /// duplicate-tolerant.
    #[must_use]
    pub fn candidates(&self) -> &[AccountId] {
        &self.candidates
    }

    /// Returns whether the worker has applied for the task.
    #[must_use]
    pub fn is_candidate(&self, worker: &AccountId) -> bool {
        self.candidates.contains(worker)
    }

    /// Returns the worker currently responsible for the task, if any.
    ///
    /// The field is retained after approval for the audit trail; use
    /// [`Self::is_complete`] to distinguish an active assignment.
    #[must_use]
    pub const fn assignee(&self) -> Option<&AccountId> {
        self.assignee.as_ref()
    }

    /// Returns whether the task is assigned to someone.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assignee.is_some()
    }

    /// Returns the evidence currently awaiting review, if any.
    #[must_use]
    pub const fn evidence(&self) -> Option<&Evidence> {
        self.evidence.as_ref()
    }

    /// Returns whether evidence is currently awaiting review.
    #[must_use]
    pub const fn has_evidence(&self) -> bool {
        self.evidence.is_some()
    }

    /// Returns the identity that approved the task, if approved.
    #[must_use]
    pub const fn endorsed_by(&self) -> Option<&AccountId> {
        self.endorsed_by.as_ref()
    }

    /// Returns whether the task has been completed and approved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Returns the storage revision used for conditional updates.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Checks that `caller` is the job that owns this task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotTaskOwner`] on a mismatch.
    pub fn ensure_owned_by(&self, caller: JobId) -> Result<(), TaskDomainError> {
        if caller != self.owning_job {
            return Err(TaskDomainError::NotTaskOwner {
                task_id: self.id,
                caller,
            });
        }
        Ok(())
    }

    /// Records a worker's application for the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskAlreadyComplete`] when the task is
    /// complete.
    pub fn add_candidate(
        &mut self,
        worker: AccountId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        self.candidates.push(worker);
        self.touch(clock);
        Ok(())
    }

    /// Assigns the task to a worker.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskAlreadyComplete`] when the task is
    /// complete, or [`TaskDomainError::TaskAlreadyAssigned`] when someone
    /// already holds the assignment.
    pub fn assign(
        &mut self,
        worker: AccountId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        if self.assignee.is_some() {
            return Err(TaskDomainError::TaskAlreadyAssigned(self.id));
        }
        self.assignee = Some(worker);
        self.touch(clock);
        Ok(())
    }

    /// Replaces the task's assignee, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskAlreadyComplete`] when the task is
    /// complete, [`TaskDomainError::EvidencePending`] while submitted
    /// evidence awaits review, or [`TaskDomainError::SameWorker`] when the
    /// new worker already holds the assignment.
    pub fn reassign(
        &mut self,
        new_worker: AccountId,
        clock: &impl Clock,
    ) -> Result<Option<AccountId>, TaskDomainError> {
        self.ensure_not_complete()?;
        if self.evidence.is_some() {
            return Err(TaskDomainError::EvidencePending(self.id));
        }
        if self.assignee.as_ref() == Some(&new_worker) {
            return Err(TaskDomainError::SameWorker(self.id));
        }
        let previous = self.assignee.replace(new_worker);
        self.touch(clock);
        Ok(previous)
    }

    /// Records evidence submitted by the task's assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskAlreadyComplete`] when the task is
    /// complete, or [`TaskDomainError::NotAssignee`] when `submitter` does
    /// not hold the assignment.
    pub fn submit_evidence(
        &mut self,
        evidence: Evidence,
        submitter: &AccountId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        if self.assignee.as_ref() != Some(submitter) {
            return Err(TaskDomainError::NotAssignee {
                task_id: self.id,
                submitter: submitter.clone(),
            });
        }
        self.evidence = Some(evidence);
        self.touch(clock);
        Ok(())
    }

    /// Approves the submitted evidence, completing the task.
    ///
    /// Completion is terminal: the evidence leaves review, `endorsed_by` is
    /// recorded, and no further transition will ever succeed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskAlreadyComplete`] when the task is
    /// already complete, or [`TaskDomainError::NoEvidence`] when nothing is
    /// awaiting review.
    pub fn approve(
        &mut self,
        endorser: AccountId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        if self.evidence.is_none() {
            return Err(TaskDomainError::NoEvidence(self.id));
        }
        self.evidence = None;
        self.endorsed_by = Some(endorser);
        self.is_complete = true;
        self.touch(clock);
        Ok(())
    }

    /// Rejects the submitted evidence, returning the task to the
    /// assigned-without-evidence state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskAlreadyComplete`] when the task is
    /// complete, or [`TaskDomainError::NoEvidence`] when nothing is
    /// awaiting review.
    pub fn reject_evidence(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_not_complete()?;
        if self.evidence.is_none() {
            return Err(TaskDomainError::NoEvidence(self.id));
        }
        self.evidence = None;
        self.touch(clock);
        Ok(())
    }

    /// Bumps the storage revision; called by stores on successful commit.
    pub(crate) const fn advance_revision(&mut self) {
        self.revision += 1;
    }

    const fn ensure_not_complete(&self) -> Result<(), TaskDomainError> {
        if self.is_complete {
            return Err(TaskDomainError::TaskAlreadyComplete(self.id));
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
