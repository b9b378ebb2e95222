//! Service layer for the job lifecycle and escrow orchestration.
//!
//! Provides [`JobService`], which routes every task operation through its
//! owning job, enforces the job-level authorization and state gates, and is
//! the sole mover of escrowed funds. Operations on one job are serialized
//! behind a per-job mutex; operations on different jobs proceed fully
//! concurrently.

use crate::identity::domain::AccountId;
use crate::job::{
    domain::{Job, JobDomainError, JobId, JobStatus},
    ports::{JobRepository, JobRepositoryError},
};
use crate::ledger::{
    domain::Funds,
    ports::{Ledger, LedgerError},
};
use crate::task::{
    domain::{Evidence, TaskId},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskRegistry, TaskRegistryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Request payload for adding a task to a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    title: String,
    description: String,
    compensation: Funds,
    funds_provided: Funds,
}

impl AddTaskRequest {
    /// Creates a request with the task's immutable fields and the funds
    /// attached to cover them.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        compensation: Funds,
        funds_provided: Funds,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            compensation,
            funds_provided,
        }
    }
}

/// Service-level errors for job lifecycle operations.
#[derive(Debug, Error)]
pub enum JobLifecycleError {
    /// No job exists with the given identifier.
    #[error("no job exists with id {0}")]
    UnknownJob(JobId),
    /// A job-level authorization or state rule failed.
    #[error(transparent)]
    Domain(#[from] JobDomainError),
    /// The delegated task registry operation failed.
    #[error(transparent)]
    Task(#[from] TaskRegistryError),
    /// A ledger movement failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
}

/// Result type for job lifecycle operations.
pub type JobLifecycleResult<T> = Result<T, JobLifecycleError>;

/// Job lifecycle and escrow orchestration service.
///
/// Escrow discipline: funds are captured from the owner's ledger account
/// atomically with task creation and released to the assignee atomically
/// with approval. A release can only follow a successful approval, so it
/// cannot happen twice and cannot happen for a task another job owns (the
/// registry's ownership check enforces that transitively). Completing a
/// job never moves funds.
#[derive(Clone)]
pub struct JobService<J, R, C>
where
    J: JobRepository,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    jobs: Arc<J>,
    registry: Arc<TaskRegistry<R, C>>,
    ledger: Arc<dyn Ledger>,
    clock: Arc<C>,
    locks: Arc<Mutex<HashMap<JobId, Arc<Mutex<()>>>>>,
}

impl<J, R, C> JobService<J, R, C>
where
    J: JobRepository,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new job lifecycle service.
    #[must_use]
    pub fn new(
        jobs: Arc<J>,
        registry: Arc<TaskRegistry<R, C>>,
        ledger: Arc<dyn Ledger>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            jobs,
            registry,
            ledger,
            clock,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Adds a task to the job, capturing its compensation into escrow.
    ///
    /// The funds are withdrawn from the owner's ledger account and must
    /// match the declared compensation exactly; neither overpayment nor
    /// underpayment is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist, [`JobLifecycleError::Domain`] when the caller is not the
    /// owner, the job is complete, or the funds mismatch, and
    /// [`JobLifecycleError::Ledger`] when the owner's balance cannot cover
    /// the funds.
    pub async fn add_task(
        &self,
        job_id: JobId,
        caller: &AccountId,
        request: AddTaskRequest,
    ) -> JobLifecycleResult<TaskId> {
        let lock = self.serialization_lock(job_id).await;
        let _serialized = lock.lock().await;

        let mut job = self.find_or_error(job_id).await?;
        job.ensure_owned_by(caller)?;
        job.ensure_not_complete()?;

        let AddTaskRequest {
            title,
            description,
            compensation,
            funds_provided,
        } = request;
        if funds_provided != compensation {
            return Err(JobDomainError::WrongCompensation {
                expected: compensation,
                provided: funds_provided,
            }
            .into());
        }
        if job.escrow().checked_add(funds_provided).is_none() {
            return Err(JobDomainError::EscrowOverflow(job_id).into());
        }

        self.ledger.withdraw(caller, funds_provided).await?;
        let created = match self
            .registry
            .create_task(
                job.id(),
                CreateTaskRequest::new(title, description, compensation),
            )
            .await
        {
            Ok(task) => task,
            Err(err) => {
                // Hand the funds back before surfacing the failure.
                self.ledger.deposit(caller, funds_provided).await?;
                return Err(err.into());
            }
        };

        job.record_task(created.id(), funds_provided, &*self.clock)?;
        self.jobs.update(&job).await?;
        Ok(created.id())
    }

    /// Records the calling worker's application for a task of this job.
    ///
    /// Worker validity is enforced by the registry's worker directory.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist, [`JobLifecycleError::Domain`] when the job is complete or
    /// the task does not belong to it, and [`JobLifecycleError::Task`]
    /// when the registry rejects the candidacy.
    pub async fn add_candidate(
        &self,
        job_id: JobId,
        caller: &AccountId,
        task_id: TaskId,
    ) -> JobLifecycleResult<()> {
        let lock = self.serialization_lock(job_id).await;
        let _serialized = lock.lock().await;

        let job = self.find_or_error(job_id).await?;
        job.ensure_not_complete()?;
        job.ensure_contains_task(task_id)?;

        self.registry
            .add_candidate(task_id, job.id(), caller.clone())
            .await?;
        Ok(())
    }

    /// Assigns a task of this job to a worker.
    ///
    /// On success the worker joins the collaborator set and an open job
    /// moves to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist, [`JobLifecycleError::Domain`] when the caller is not the
    /// owner, the job is complete, or the task does not belong to it, and
    /// [`JobLifecycleError::Task`] when the registry rejects the
    /// assignment.
    pub async fn assign_task(
        &self,
        job_id: JobId,
        caller: &AccountId,
        task_id: TaskId,
        worker: AccountId,
    ) -> JobLifecycleResult<()> {
        let lock = self.serialization_lock(job_id).await;
        let _serialized = lock.lock().await;

        let mut job = self.find_or_error(job_id).await?;
        job.ensure_owned_by(caller)?;
        job.ensure_not_complete()?;
        job.ensure_contains_task(task_id)?;

        self.registry
            .assign(task_id, job.id(), worker.clone())
            .await?;
        job.note_assignment(worker, &*self.clock);
        self.jobs.update(&job).await?;
        Ok(())
    }

    /// Moves a task of this job from its current assignee to another
    /// worker.
    ///
    /// The previous assignee leaves the collaborator set unless they still
    /// hold another active task under this job.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist, [`JobLifecycleError::Domain`] when the caller is not the
    /// owner, the job is complete, or the task does not belong to it, and
    /// [`JobLifecycleError::Task`] when the registry rejects the
    /// reassignment.
    pub async fn reassign_task(
        &self,
        job_id: JobId,
        caller: &AccountId,
        task_id: TaskId,
        worker: AccountId,
    ) -> JobLifecycleResult<()> {
        let lock = self.serialization_lock(job_id).await;
        let _serialized = lock.lock().await;

        let mut job = self.find_or_error(job_id).await?;
        job.ensure_owned_by(caller)?;
        job.ensure_not_complete()?;
        job.ensure_contains_task(task_id)?;

        let outcome = self
            .registry
            .reassign(task_id, job.id(), worker.clone())
            .await?;
        if let Some(previous) = outcome.previous {
            self.drop_collaborator_if_idle(&mut job, &previous).await?;
        }
        job.note_assignment(worker, &*self.clock);
        self.jobs.update(&job).await?;
        Ok(())
    }

    /// Submits evidence for a task of this job on behalf of the calling
    /// worker.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist, [`JobLifecycleError::Domain`] when the job is complete, the
    /// task does not belong to it, or the caller holds no active
    /// assignment here, and [`JobLifecycleError::Task`] when the caller is
    /// not the task's assignee.
    pub async fn submit_task(
        &self,
        job_id: JobId,
        caller: &AccountId,
        task_id: TaskId,
        evidence: Evidence,
    ) -> JobLifecycleResult<()> {
        let lock = self.serialization_lock(job_id).await;
        let _serialized = lock.lock().await;

        let job = self.find_or_error(job_id).await?;
        job.ensure_not_complete()?;
        job.ensure_contains_task(task_id)?;
        job.ensure_collaborator(caller)?;

        self.registry
            .submit_evidence(task_id, job.id(), caller, evidence)
            .await?;
        Ok(())
    }

    /// Approves the evidence for a task of this job and pays the assignee
    /// out of escrow.
    ///
    /// The approval completes first; a task that is already complete fails
    /// before any funds move, so compensation can never be paid twice.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist, [`JobLifecycleError::Domain`] when the caller is not the
    /// owner, the job is complete, or the task does not belong to it, and
    /// [`JobLifecycleError::Task`] when the registry rejects the approval.
    pub async fn approve_task(
        &self,
        job_id: JobId,
        caller: &AccountId,
        task_id: TaskId,
    ) -> JobLifecycleResult<()> {
        let lock = self.serialization_lock(job_id).await;
        let _serialized = lock.lock().await;

        let mut job = self.find_or_error(job_id).await?;
        job.ensure_owned_by(caller)?;
        job.ensure_not_complete()?;
        job.ensure_contains_task(task_id)?;

        let approved = self
            .registry
            .approve(task_id, job.id(), caller.clone())
            .await?;
        job.release_escrow(approved.compensation(), &*self.clock)?;
        if let Some(assignee) = approved.assignee().cloned() {
            self.ledger
                .deposit(&assignee, approved.compensation())
                .await?;
            self.drop_collaborator_if_idle(&mut job, &assignee).await?;
        }
        self.jobs.update(&job).await?;
        Ok(())
    }

    /// Rejects the evidence for a task of this job; no funds move and the
    /// assignee may resubmit.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist, [`JobLifecycleError::Domain`] when the caller is not the
    /// owner, the job is complete, or the task does not belong to it, and
    /// [`JobLifecycleError::Task`] when the registry rejects the call.
    pub async fn reject_task(
        &self,
        job_id: JobId,
        caller: &AccountId,
        task_id: TaskId,
    ) -> JobLifecycleResult<()> {
        let lock = self.serialization_lock(job_id).await;
        let _serialized = lock.lock().await;

        let job = self.find_or_error(job_id).await?;
        job.ensure_owned_by(caller)?;
        job.ensure_not_complete()?;
        job.ensure_contains_task(task_id)?;

        self.registry
            .reject_evidence(task_id, job.id(), caller.clone())
            .await?;
        Ok(())
    }

    /// Moves the job to its terminal `Completed` state.
    ///
    /// The completion gate is a derived predicate evaluated now: every
    /// task of the job must report complete. A job with no tasks passes
    /// trivially. By this point every approval has already disbursed its
    /// own funds, so completion itself moves none.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist, and [`JobLifecycleError::Domain`] when the caller is not the
    /// owner, the job is already complete, or a task remains incomplete.
    pub async fn complete_job(&self, job_id: JobId, caller: &AccountId) -> JobLifecycleResult<()> {
        let lock = self.serialization_lock(job_id).await;
        let _serialized = lock.lock().await;

        let mut job = self.find_or_error(job_id).await?;
        job.ensure_owned_by(caller)?;
        job.ensure_not_complete()?;

        let task_ids = job.task_ids().to_vec();
        for task_id in task_ids {
            if !self.registry.is_completed_task(task_id).await? {
                return Err(JobDomainError::TasksIncomplete(job_id).into());
            }
        }

        job.complete(&*self.clock);
        self.jobs.update(&job).await?;
        Ok(())
    }

    /// Finds a job by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find(&self, job_id: JobId) -> JobLifecycleResult<Option<Job>> {
        Ok(self.jobs.find_by_id(job_id).await?)
    }

    /// Returns the identifiers of the tasks created under the job, in
    /// creation order.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist.
    pub async fn tasks(&self, job_id: JobId) -> JobLifecycleResult<Vec<TaskId>> {
        let job = self.find_or_error(job_id).await?;
        Ok(job.task_ids().to_vec())
    }

    /// Returns whether the task was created under the job.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist.
    pub async fn is_job_task(&self, job_id: JobId, task_id: TaskId) -> JobLifecycleResult<bool> {
        let job = self.find_or_error(job_id).await?;
        Ok(job.contains_task(task_id))
    }

    /// Returns the job's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist.
    pub async fn status(&self, job_id: JobId) -> JobLifecycleResult<JobStatus> {
        let job = self.find_or_error(job_id).await?;
        Ok(job.status())
    }

    /// Returns whether the account currently holds an active assignment
    /// under the job.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist.
    pub async fn is_collaborator(
        &self,
        job_id: JobId,
        account: &AccountId,
    ) -> JobLifecycleResult<bool> {
        let job = self.find_or_error(job_id).await?;
        Ok(job.is_collaborator(account))
    }

    /// Returns the job's escrowed balance.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::UnknownJob`] when the job does not
    /// exist.
    pub async fn escrow_balance(&self, job_id: JobId) -> JobLifecycleResult<Funds> {
        let job = self.find_or_error(job_id).await?;
        Ok(job.escrow())
    }

    /// Drops a worker from the collaborator set when they no longer hold
    /// an active task under this job.
    async fn drop_collaborator_if_idle(
        &self,
        job: &mut Job,
        worker: &AccountId,
    ) -> JobLifecycleResult<()> {
        let remaining = self.registry.active_tasks_for_worker(worker).await?;
        let still_active_here = remaining.iter().any(|id| job.contains_task(*id));
        if !still_active_here {
            job.remove_collaborator(worker, &*self.clock);
        }
        Ok(())
    }

    async fn find_or_error(&self, job_id: JobId) -> JobLifecycleResult<Job> {
        self.jobs
            .find_by_id(job_id)
            .await?
            .ok_or(JobLifecycleError::UnknownJob(job_id))
    }

    /// Returns the mutex serializing mutations of one job.
    async fn serialization_lock(&self, job_id: JobId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(job_id).or_default())
    }
}
