//! Shared test helpers for the in-memory marketplace integration tests.

use std::sync::Arc;

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
    services::{AddTaskRequest, CreateJobRequest, JobFactory, JobService},
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

/// The compensation used by every funded task in these tests.
pub const VALUE: Funds = Funds::new(10_000);

/// A fully wired marketplace over in-memory adapters.
pub struct Market {
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
}

/// Provides a fresh marketplace for each test.
#[fixture]
pub fn market() -> Market {
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
    Market {
        companies,
        workers,
        ledger,
        registry,
        factory,
        service,
    }
}

/// Builds an account identity for tests.
///
/// # Panics
///
/// Panics when the value is not a valid account id.
pub fn account(value: &str) -> AccountId {
    AccountId::new(value).expect("valid account id")
}

/// Builds evidence for tests.
///
/// # Panics
///
/// Panics when the value is not valid evidence.
pub fn evidence(value: &str) -> Evidence {
    Evidence::new(value).expect("valid evidence")
}

/// Registers `company1`, `worker1`, and `worker2`, then deploys one job
/// owned by the company.
pub async fn deploy_market_job(market: &Market) -> JobId {
    market
        .companies
        .register(account("company1"), "Apple", "apple.com")
        .await
        .expect("company registration");
    market
        .workers
        .register(account("worker1"))
        .await
        .expect("worker1 registration");
    market
        .workers
        .register(account("worker2"))
        .await
        .expect("worker2 registration");
    let job = market
        .factory
        .create_job(
            account("company1"),
            CreateJobRequest::new("Create new website", "Help our company make something cool"),
        )
        .await
        .expect("job deployment");
    job.id()
}

/// Funds the company with [`VALUE`] and adds one task to the job.
pub async fn add_funded_task(market: &Market, job_id: JobId) -> TaskId {
    market
        .ledger
        .deposit(&account("company1"), VALUE)
        .await
        .expect("funding");
    market
        .service
        .add_task(
            job_id,
            &account("company1"),
            AddTaskRequest::new("UIUX", "I want it to be nice!", VALUE, VALUE),
        )
        .await
        .expect("task addition")
}

/// Drives a funded task to submitted evidence by `worker1`: both workers
/// apply, `worker1` is assigned and submits.
pub async fn task_under_review(market: &Market, job_id: JobId) -> TaskId {
    let task_id = add_funded_task(market, job_id).await;
    market
        .service
        .add_candidate(job_id, &account("worker1"), task_id)
        .await
        .expect("worker1 candidacy");
    market
        .service
        .add_candidate(job_id, &account("worker2"), task_id)
        .await
        .expect("worker2 candidacy");
    market
        .service
        .assign_task(job_id, &account("company1"), task_id, account("worker1"))
        .await
        .expect("assignment");
    market
        .service
        .submit_task(
            job_id,
            &account("worker1"),
            task_id,
            evidence("www.checkthislink.com"),
        )
        .await
        .expect("submission");
    task_id
}
