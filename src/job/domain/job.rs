//! Job aggregate root.

use super::{JobDomainError, JobId, JobStatus};
use crate::identity::domain::AccountId;
use crate::ledger::domain::Funds;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Validated creation parameters for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    title: String,
    description: String,
}

impl JobDetails {
    /// Creates job details from a title and description.
    ///
    /// The title is trimmed and must be non-empty; the description may be
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::EmptyJobTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, JobDomainError> {
        let trimmed_title = title.into().trim().to_owned();
        if trimmed_title.is_empty() {
            return Err(JobDomainError::EmptyJobTitle);
        }
        Ok(Self {
            title: trimmed_title,
            description: description.into(),
        })
    }

    /// Returns the job title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the job description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Job aggregate root.
///
/// Holds the escrow balance for its tasks, the ordered list of task
/// identifiers created under it, and the set of workers currently holding
/// an active assignment. Once `status` reaches `Completed` the job is
/// immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    owner: AccountId,
    title: String,
    description: String,
    status: JobStatus,
    task_ids: Vec<TaskId>,
    collaborators: BTreeSet<AccountId>,
    escrow: Funds,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates a new open job owned by `owner`.
    #[must_use]
    pub fn new(id: JobId, owner: AccountId, details: JobDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let JobDetails { title, description } = details;
        Self {
            id,
            owner,
            title,
            description,
            status: JobStatus::Open,
            task_ids: Vec::new(),
            collaborators: BTreeSet::new(),
            escrow: Funds::ZERO,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the company identity that owns the job.
    #[must_use]
    pub const fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Returns the job title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the job description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the job lifecycle status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the identifiers of the tasks created under the job, in
    /// creation order.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns whether the task was created under this job.
    #[must_use]
    pub fn contains_task(&self, task_id: TaskId) -> bool {
        self.task_ids.contains(&task_id)
    }

    /// Returns the workers currently holding an active assignment under
    /// the job.
    #[must_use]
    pub const fn collaborators(&self) -> &BTreeSet<AccountId> {
        &self.collaborators
    }

    /// Returns whether the account currently holds an active assignment
    /// under the job.
    #[must_use]
    pub fn is_collaborator(&self, account: &AccountId) -> bool {
        self.collaborators.contains(account)
    }

    /// Returns the escrowed balance: the sum of compensations of tasks not
    /// yet approved.
    #[must_use]
    pub const fn escrow(&self) -> Funds {
        self.escrow
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

    /// Checks that `caller` is the company that owns this job.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::NotJobOwner`] on a mismatch.
    pub fn ensure_owned_by(&self, caller: &AccountId) -> Result<(), JobDomainError> {
        if caller != &self.owner {
            return Err(JobDomainError::NotJobOwner {
                job_id: self.id,
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// Checks that the job has not been completed.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::JobAlreadyComplete`] when the job is in
    /// its terminal state.
    pub const fn ensure_not_complete(&self) -> Result<(), JobDomainError> {
        if self.status.is_completed() {
            return Err(JobDomainError::JobAlreadyComplete(self.id));
        }
        Ok(())
    }

    /// Checks that the task was created under this job.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::NotJobTask`] when it was not.
    pub fn ensure_contains_task(&self, task_id: TaskId) -> Result<(), JobDomainError> {
        if !self.contains_task(task_id) {
            return Err(JobDomainError::NotJobTask {
                job_id: self.id,
                task_id,
            });
        }
        Ok(())
    }

    /// Checks that the caller currently holds an active assignment under
    /// this job.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::NotCollaborator`] when they do not.
    pub fn ensure_collaborator(&self, caller: &AccountId) -> Result<(), JobDomainError> {
        if !self.is_collaborator(caller) {
            return Err(JobDomainError::NotCollaborator {
                job_id: self.id,
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// Records a newly created task and captures its compensation into
    /// escrow.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::EscrowOverflow`] when the escrow balance
    /// would overflow.
    pub fn record_task(
        &mut self,
        task_id: TaskId,
        funds: Funds,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        let escrowed = self
            .escrow
            .checked_add(funds)
            .ok_or(JobDomainError::EscrowOverflow(self.id))?;
        self.escrow = escrowed;
        self.task_ids.push(task_id);
        self.touch(clock);
        Ok(())
    }

    /// Records a successful assignment: the worker joins the collaborator
    /// set and an open job moves to `InProgress`.
    pub fn note_assignment(&mut self, worker: AccountId, clock: &impl Clock) {
        self.collaborators.insert(worker);
        if self.status == JobStatus::Open {
            self.status = JobStatus::InProgress;
        }
        self.touch(clock);
    }

    /// Removes a worker from the collaborator set.
    ///
    /// Callers are expected to have checked that the worker no longer
    /// holds an active assignment under this job.
    pub fn remove_collaborator(&mut self, worker: &AccountId, clock: &impl Clock) {
        self.collaborators.remove(worker);
        self.touch(clock);
    }

    /// Releases funds from escrow for an approved task.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::EscrowUnderflow`] when the amount exceeds
    /// the escrowed balance.
    pub fn release_escrow(
        &mut self,
        amount: Funds,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        let remaining = self
            .escrow
            .checked_sub(amount)
            .ok_or(JobDomainError::EscrowUnderflow(self.id))?;
        self.escrow = remaining;
        self.touch(clock);
        Ok(())
    }

    /// Moves the job to its terminal `Completed` state.
    ///
    /// Callers are expected to have verified that every task under the job
    /// is complete; completion never moves funds.
    pub fn complete(&mut self, clock: &impl Clock) {
        self.status = JobStatus::Completed;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
