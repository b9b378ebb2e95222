//! Service layer for the task registry.
//!
//! Provides [`TaskRegistry`], which wraps the task aggregate's transitions
//! with ownership checks, worker validation, event recording, and the
//! conditional-update loop that serializes racing mutations per task.

use crate::identity::domain::AccountId;
use crate::job::domain::JobId;
use crate::ledger::domain::Funds;
use crate::task::{
    domain::{Evidence, Task, TaskDetails, TaskDomainError, TaskEvent, TaskId},
    ports::{
        TaskEventLog, TaskEventLogError, TaskRepository, TaskRepositoryError, WorkerDirectory,
        WorkerDirectoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    compensation: Funds,
}

impl CreateTaskRequest {
    /// Creates a request with the task's immutable fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        compensation: Funds,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            compensation,
        }
    }
}

/// Outcome of a successful reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    /// The worker who previously held the assignment, if any.
    pub previous: Option<AccountId>,
    /// The task after reassignment.
    pub task: Task,
}

/// Service-level errors for task registry operations.
#[derive(Debug, Error)]
pub enum TaskRegistryError {
    /// The task identifier is unknown.
    #[error("not a valid task id: {0}")]
    InvalidTask(TaskId),
    /// The worker is not an active registered worker.
    #[error("{0} is not an active registered worker")]
    UnregisteredWorker(AccountId),
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Worker directory lookup failed.
    #[error(transparent)]
    Directory(#[from] WorkerDirectoryError),
    /// Event log operation failed.
    #[error(transparent)]
    EventLog(#[from] TaskEventLogError),
}

/// Result type for task registry operations.
pub type TaskRegistryResult<T> = Result<T, TaskRegistryError>;

/// Task registry orchestration service.
///
/// All tasks share one namespace; the registry partitions authority by the
/// `owning_job` recorded on each task, so a job can only ever move state
/// for tasks it created itself.
#[derive(Clone)]
pub struct TaskRegistry<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    events: Arc<dyn TaskEventLog>,
    workers: Arc<dyn WorkerDirectory>,
    clock: Arc<C>,
}

impl<R, C> TaskRegistry<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task registry service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        events: Arc<dyn TaskEventLog>,
        workers: Arc<dyn WorkerDirectory>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            events,
            workers,
            clock,
        }
    }

    /// Creates a new task owned by `owning_job`.
    ///
    /// Ownership is self-registering: whichever identity calls becomes the
    /// task's owner and the sole identity allowed to mutate it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Domain`] when the request fails
    /// validation, or [`TaskRegistryError::Repository`] when persistence
    /// fails.
    pub async fn create_task(
        &self,
        owning_job: JobId,
        request: CreateTaskRequest,
    ) -> TaskRegistryResult<Task> {
        let CreateTaskRequest {
            title,
            description,
            compensation,
        } = request;
        let details = TaskDetails::new(title, description, compensation)?;
        let id = self.repository.allocate_id().await?;
        let task = Task::new(id, owning_job, details, &*self.clock);
        self.repository.insert(&task).await?;
        self.events
            .record(TaskEvent::Created {
                task_id: task.id(),
                owning_job,
                compensation: task.compensation(),
                at: task.created_at(),
            })
            .await?;
        Ok(task)
    }

    /// Records a worker's application for a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::UnregisteredWorker`] when the worker
    /// holds no active registration, [`TaskRegistryError::InvalidTask`]
    /// when the task is unknown, or [`TaskRegistryError::Domain`] when the
    /// caller is not the owner or the task is complete.
    pub async fn add_candidate(
        &self,
        task_id: TaskId,
        caller: JobId,
        worker: AccountId,
    ) -> TaskRegistryResult<Task> {
        if !self.workers.is_active_worker(&worker).await? {
            return Err(TaskRegistryError::UnregisteredWorker(worker));
        }
        let clock = &*self.clock;
        self.mutate(task_id, caller, |task| {
            task.add_candidate(worker.clone(), clock)
        })
        .await
    }

    /// Assigns a task to a worker.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::InvalidTask`] when the task is unknown,
    /// or [`TaskRegistryError::Domain`] when the caller is not the owner,
    /// the task is complete, or it is already assigned.
    pub async fn assign(
        &self,
        task_id: TaskId,
        caller: JobId,
        worker: AccountId,
    ) -> TaskRegistryResult<Task> {
        let clock = &*self.clock;
        let task = self
            .mutate(task_id, caller, |task| task.assign(worker.clone(), clock))
            .await?;
        self.events
            .record(TaskEvent::Assigned {
                task_id: task.id(),
                assigned_to: worker,
                at: task.updated_at(),
            })
            .await?;
        Ok(task)
    }

    /// Replaces a task's assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::InvalidTask`] when the task is unknown,
    /// or [`TaskRegistryError::Domain`] when the caller is not the owner,
    /// the task is complete, evidence is pending review, or the new worker
    /// already holds the assignment.
    pub async fn reassign(
        &self,
        task_id: TaskId,
        caller: JobId,
        new_worker: AccountId,
    ) -> TaskRegistryResult<Reassignment> {
        let clock = &*self.clock;
        let mut previous = None;
        let task = self
            .mutate(task_id, caller, |task| {
                previous = task.reassign(new_worker.clone(), clock)?;
                Ok(())
            })
            .await?;
        self.events
            .record(TaskEvent::Assigned {
                task_id: task.id(),
                assigned_to: new_worker.clone(),
                at: task.updated_at(),
            })
            .await?;
        self.events
            .record(TaskEvent::Reassigned {
                task_id: task.id(),
                previous: previous.clone(),
                assigned_to: new_worker,
                at: task.updated_at(),
            })
            .await?;
        Ok(Reassignment { previous, task })
    }

    /// Records evidence submitted by the task's assignee.
    ///
    /// The job supplies `submitter` as the identity it believes is calling;
    /// only the current assignee is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::InvalidTask`] when the task is unknown,
    /// or [`TaskRegistryError::Domain`] when the caller is not the owner,
    /// the task is complete, or the submitter is not the assignee.
    pub async fn submit_evidence(
        &self,
        task_id: TaskId,
        caller: JobId,
        submitter: &AccountId,
        evidence: Evidence,
    ) -> TaskRegistryResult<Task> {
        let clock = &*self.clock;
        let recorded = evidence.clone();
        let task = self
            .mutate(task_id, caller, |task| {
                task.submit_evidence(evidence.clone(), submitter, clock)
            })
            .await?;
        self.events
            .record(TaskEvent::EvidenceSubmitted {
                task_id: task.id(),
                evidence: recorded,
                at: task.updated_at(),
            })
            .await?;
        Ok(task)
    }

    /// Approves the submitted evidence, completing the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::InvalidTask`] when the task is unknown,
    /// or [`TaskRegistryError::Domain`] when the caller is not the owner,
    /// the task is already complete, or no evidence awaits review.
    pub async fn approve(
        &self,
        task_id: TaskId,
        caller: JobId,
        endorser: AccountId,
    ) -> TaskRegistryResult<Task> {
        let clock = &*self.clock;
        let task = self
            .mutate(task_id, caller, |task| {
                task.approve(endorser.clone(), clock)
            })
            .await?;
        if let Some(assigned_to) = task.assignee() {
            self.events
                .record(TaskEvent::Approved {
                    task_id: task.id(),
                    assigned_to: assigned_to.clone(),
                    endorsed_by: endorser,
                    at: task.updated_at(),
                })
                .await?;
        }
        Ok(task)
    }

    /// Rejects the submitted evidence, clearing it for resubmission.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::InvalidTask`] when the task is unknown,
    /// or [`TaskRegistryError::Domain`] when the caller is not the owner,
    /// the task is complete, or no evidence awaits review.
    pub async fn reject_evidence(
        &self,
        task_id: TaskId,
        caller: JobId,
        rejecter: AccountId,
    ) -> TaskRegistryResult<Task> {
        let clock = &*self.clock;
        let task = self
            .mutate(task_id, caller, |task| task.reject_evidence(clock))
            .await?;
        if let Some(assigned_to) = task.assignee() {
            self.events
                .record(TaskEvent::EvidenceRejected {
                    task_id: task.id(),
                    assigned_to: assigned_to.clone(),
                    rejected_by: rejecter,
                    at: task.updated_at(),
                })
                .await?;
        }
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn find(&self, task_id: TaskId) -> TaskRegistryResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Returns whether a task exists with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_valid_task(&self, task_id: TaskId) -> TaskRegistryResult<bool> {
        Ok(self.repository.find_by_id(task_id).await?.is_some())
    }

    /// Returns whether the task exists and has been completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_completed_task(&self, task_id: TaskId) -> TaskRegistryResult<bool> {
        let task = self.repository.find_by_id(task_id).await?;
        Ok(task.is_some_and(|found| found.is_complete()))
    }

    /// Returns whether the task exists and has evidence awaiting review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn has_evidence(&self, task_id: TaskId) -> TaskRegistryResult<bool> {
        let task = self.repository.find_by_id(task_id).await?;
        Ok(task.is_some_and(|found| found.has_evidence()))
    }

    /// Returns whether the worker has applied for the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_candidate(
        &self,
        task_id: TaskId,
        worker: &AccountId,
    ) -> TaskRegistryResult<bool> {
        let task = self.repository.find_by_id(task_id).await?;
        Ok(task.is_some_and(|found| found.is_candidate(worker)))
    }

    /// Returns whether the task exists and is assigned to someone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn is_assigned(&self, task_id: TaskId) -> TaskRegistryResult<bool> {
        let task = self.repository.find_by_id(task_id).await?;
        Ok(task.is_some_and(|found| found.is_assigned()))
    }

    /// Returns the task's current assignee, if the task exists and is
    /// assigned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn assignee(&self, task_id: TaskId) -> TaskRegistryResult<Option<AccountId>> {
        let task = self.repository.find_by_id(task_id).await?;
        Ok(task.and_then(|found| found.assignee().cloned()))
    }

    /// Returns the task's compensation, if the task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn compensation(&self, task_id: TaskId) -> TaskRegistryResult<Option<Funds>> {
        let task = self.repository.find_by_id(task_id).await?;
        Ok(task.map(|found| found.compensation()))
    }

    /// Returns the workers who applied for the task, in application order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn candidates_for_task(
        &self,
        task_id: TaskId,
    ) -> TaskRegistryResult<Vec<AccountId>> {
        let task = self.repository.find_by_id(task_id).await?;
        Ok(task.map(|found| found.candidates().to_vec()).unwrap_or_default())
    }

    /// Returns the identifiers of all tasks created by the job, in
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn tasks_for_job(&self, job: JobId) -> TaskRegistryResult<Vec<TaskId>> {
        let tasks = self.repository.find_by_owning_job(job).await?;
        Ok(tasks.iter().map(Task::id).collect())
    }

    /// Returns the identifiers of the tasks currently assigned to the
    /// worker and not yet complete, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::Repository`] when persistence lookup
    /// fails.
    pub async fn active_tasks_for_worker(
        &self,
        worker: &AccountId,
    ) -> TaskRegistryResult<Vec<TaskId>> {
        let tasks = self.repository.find_active_by_assignee(worker).await?;
        Ok(tasks.iter().map(Task::id).collect())
    }

    /// Returns all events recorded for a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::EventLog`] when the log cannot be read.
    pub async fn events_for_task(&self, task_id: TaskId) -> TaskRegistryResult<Vec<TaskEvent>> {
        Ok(self.events.for_task(task_id).await?)
    }

    /// Returns every recorded event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::EventLog`] when the log cannot be read.
    pub async fn events(&self) -> TaskRegistryResult<Vec<TaskEvent>> {
        Ok(self.events.all().await?)
    }

    /// Runs a read-validate-write cycle on one task.
    ///
    /// The ownership check and the transition both re-run on every attempt,
    /// so when a conditional update loses a race the loser re-validates
    /// against the winner's post-state and fails its own precondition
    /// rather than double-committing.
    async fn mutate<F>(
        &self,
        task_id: TaskId,
        caller: JobId,
        mut apply: F,
    ) -> TaskRegistryResult<Task>
    where
        F: FnMut(&mut Task) -> Result<(), TaskDomainError> + Send,
    {
        loop {
            let current = self
                .repository
                .find_by_id(task_id)
                .await?
                .ok_or(TaskRegistryError::InvalidTask(task_id))?;
            current.ensure_owned_by(caller)?;

            let mut updated = current;
            apply(&mut updated)?;

            match self.repository.update(&updated).await {
                Ok(()) => return Ok(updated),
                Err(TaskRepositoryError::RevisionConflict(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }
    }
}
