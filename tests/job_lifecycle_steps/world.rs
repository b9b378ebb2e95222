//! Shared world state for the escrowed job lifecycle BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use taskpay::identity::{
    adapters::memory::{InMemoryCompanyRepository, InMemoryWorkerRepository},
    domain::AccountId,
    services::{CompanyRegistry, WorkerRegistry},
};
use taskpay::job::{
    adapters::{directory::RegistryCompanyDirectory, memory::InMemoryJobRepository},
    domain::JobId,
    services::{AddTaskRequest, JobFactory, JobLifecycleError, JobService},
};
use taskpay::ledger::{adapters::memory::InMemoryLedger, domain::Funds, ports::Ledger};
use taskpay::task::{
    adapters::{
        directory::RegistryWorkerDirectory,
        memory::{InMemoryTaskEventLog, InMemoryTaskRepository},
    },
    domain::{Evidence, TaskId},
    services::TaskRegistry,
};

/// The compensation used by every funded task in these scenarios.
pub const VALUE: Funds = Funds::new(10_000);

/// Scenario world for the escrowed job lifecycle behaviour tests.
pub struct MarketWorld {
    /// Company identity registry.
    pub companies: Arc<CompanyRegistry<InMemoryCompanyRepository, DefaultClock>>,
    /// Worker identity registry.
    pub workers: Arc<WorkerRegistry<InMemoryWorkerRepository, DefaultClock>>,
    /// Account balances.
    pub ledger: Arc<InMemoryLedger>,
    /// The task registry.
    pub registry: Arc<TaskRegistry<InMemoryTaskRepository, DefaultClock>>,
    /// Company-gated job deployment.
    pub factory: JobFactory<InMemoryJobRepository, DefaultClock>,
    /// Job lifecycle and escrow orchestration.
    pub service: JobService<InMemoryJobRepository, InMemoryTaskRepository, DefaultClock>,
    /// The job under test.
    pub job_id: Option<JobId>,
    /// The task under test.
    pub task_id: Option<TaskId>,
    /// A second task used by the completion scenarios.
    pub second_task_id: Option<TaskId>,
    /// Outcome of the last completion attempt.
    pub last_completion: Option<Result<(), JobLifecycleError>>,
    /// Outcome of the last task addition attempt.
    pub last_addition: Option<Result<TaskId, JobLifecycleError>>,
}

impl MarketWorld {
    /// Creates a world over fresh in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let companies = Arc::new(CompanyRegistry::new(
            Arc::new(InMemoryCompanyRepository::new()),
            Arc::clone(&clock),
        ));
        let workers = Arc::new(WorkerRegistry::new(
            Arc::new(InMemoryWorkerRepository::new()),
            Arc::clone(&clock),
        ));
        let ledger = Arc::new(InMemoryLedger::new());
        let registry = Arc::new(TaskRegistry::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryTaskEventLog::new()),
            Arc::new(RegistryWorkerDirectory::new(Arc::clone(&workers))),
            Arc::clone(&clock),
        ));
        let jobs = Arc::new(InMemoryJobRepository::new());
        let factory = JobFactory::new(
            Arc::clone(&jobs),
            Arc::new(RegistryCompanyDirectory::new(Arc::clone(&companies))),
            Arc::clone(&clock),
        );
        let service = JobService::new(
            jobs,
            Arc::clone(&registry),
            Arc::clone(&ledger) as Arc<dyn Ledger>,
            clock,
        );
        Self {
            companies,
            workers,
            ledger,
            registry,
            factory,
            service,
            job_id: None,
            task_id: None,
            second_task_id: None,
            last_completion: None,
            last_addition: None,
        }
    }

    /// Returns the job under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no job has been deployed yet.
    pub fn job(&self) -> Result<JobId, eyre::Report> {
        self.job_id
            .ok_or_else(|| eyre::eyre!("no job deployed in scenario world"))
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been added yet.
    pub fn task(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("no task added in scenario world"))
    }

    /// Funds the company and adds one task worth [`VALUE`] to the job.
    ///
    /// # Errors
    ///
    /// Returns an error when funding or the addition fails.
    pub fn fund_and_add_task(&self) -> Result<TaskId, eyre::Report> {
        let job_id = self.job()?;
        run_async(self.ledger.deposit(&account("company1"), VALUE))
            .wrap_err("fund the company")?;
        run_async(self.service.add_task(
            job_id,
            &account("company1"),
            AddTaskRequest::new("UIUX", "I want it to be nice!", VALUE, VALUE),
        ))
        .wrap_err("add a funded task")
    }

    /// Drives an existing task through candidacy, assignment to `worker`,
    /// submission, and approval.
    ///
    /// # Errors
    ///
    /// Returns an error when any stage of the flow fails.
    pub fn drive_to_approval(&self, task_id: TaskId, worker: &str) -> Result<(), eyre::Report> {
        let job_id = self.job()?;
        run_async(self.service.add_candidate(job_id, &account(worker), task_id))
            .wrap_err("apply for the task")?;
        run_async(self.service.assign_task(
            job_id,
            &account("company1"),
            task_id,
            account(worker),
        ))
        .wrap_err("assign the task")?;
        run_async(self.service.submit_task(
            job_id,
            &account(worker),
            task_id,
            evidence("www.checkthislink.com"),
        ))
        .wrap_err("submit evidence")?;
        run_async(
            self.service
                .approve_task(job_id, &account("company1"), task_id),
        )
        .wrap_err("approve the task")
    }
}

impl Default for MarketWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MarketWorld {
    MarketWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds an account identity for scenarios.
///
/// # Panics
///
/// Panics when the value is not a valid account id.
pub fn account(value: &str) -> AccountId {
    AccountId::new(value).expect("valid account id")
}

/// Builds evidence for scenarios.
///
/// # Panics
///
/// Panics when the value is not valid evidence.
pub fn evidence(value: &str) -> Evidence {
    Evidence::new(value).expect("valid evidence")
}
