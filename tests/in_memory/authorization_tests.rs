//! Integration tests for identity checks and cross-job partitioning.

use rstest::rstest;
use taskpay::job::{
    domain::JobDomainError,
    services::{CreateJobRequest, JobFactoryError, JobLifecycleError},
};
use taskpay::ledger::ports::Ledger;
use taskpay::task::{domain::TaskDomainError, services::TaskRegistryError};

use super::helpers::{
    VALUE, Market, account, add_funded_task, deploy_market_job, evidence, market,
    task_under_review,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn job_creation_is_gated_on_company_registration(market: Market) {
    let result = market
        .factory
        .create_job(
            account("nobody"),
            CreateJobRequest::new("Create new website", "description"),
        )
        .await;

    assert!(matches!(
        result,
        Err(JobFactoryError::UnregisteredCompany(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn candidacy_is_gated_on_worker_registration(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = add_funded_task(&market, job_id).await;

    let result = market
        .service
        .add_candidate(job_id, &account("lurker"), task_id)
        .await;

    assert!(matches!(
        result,
        Err(JobLifecycleError::Task(
            TaskRegistryError::UnregisteredWorker(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_owner_drives_the_job(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = task_under_review(&market, job_id).await;

    let approve = market
        .service
        .approve_task(job_id, &account("worker1"), task_id)
        .await;
    let reject = market
        .service
        .reject_task(job_id, &account("worker2"), task_id)
        .await;
    let complete = market
        .service
        .complete_job(job_id, &account("worker1"))
        .await;

    for result in [approve, reject, complete] {
        assert!(matches!(
            result,
            Err(JobLifecycleError::Domain(JobDomainError::NotJobOwner { .. }))
        ));
    }
    assert!(
        market
            .registry
            .has_evidence(task_id)
            .await
            .expect("evidence lookup"),
        "failed calls left the submitted evidence in place"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_job_cannot_reach_into_anothers_tasks(market: Market) {
    let first_job = deploy_market_job(&market).await;
    let first_task = add_funded_task(&market, first_job).await;

    market
        .companies
        .register(account("company2"), "Orange", "orange.fr")
        .await
        .expect("second company registration");
    let second_job = market
        .factory
        .create_job(
            account("company2"),
            CreateJobRequest::new("Translate the docs", "Into French"),
        )
        .await
        .expect("second job deployment");

    // The other company cannot route the first job's task through its own
    // job, because the task is not in its task list.
    let through_own_job = market
        .service
        .assign_task(
            second_job.id(),
            &account("company2"),
            first_task,
            account("worker1"),
        )
        .await;
    assert!(matches!(
        through_own_job,
        Err(JobLifecycleError::Domain(JobDomainError::NotJobTask { .. }))
    ));

    // Even calling the registry with a foreign job identity is rejected by
    // the ownership check recorded on the task itself.
    let through_registry = market
        .registry
        .assign(first_task, second_job.id(), account("worker1"))
        .await;
    assert!(matches!(
        through_registry,
        Err(TaskRegistryError::Domain(TaskDomainError::NotTaskOwner { .. }))
    ));

    assert!(
        !market
            .registry
            .is_assigned(first_task)
            .await
            .expect("assignment lookup"),
        "no cross-job call may mutate the task"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_is_limited_to_the_assignee(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = add_funded_task(&market, job_id).await;
    market
        .service
        .add_candidate(job_id, &account("worker1"), task_id)
        .await
        .expect("candidacy");
    market
        .service
        .assign_task(job_id, &account("company1"), task_id, account("worker1"))
        .await
        .expect("assignment");

    let result = market
        .service
        .submit_task(job_id, &account("worker2"), task_id, evidence("not mine"))
        .await;

    assert!(matches!(
        result,
        Err(JobLifecycleError::Domain(
            JobDomainError::NotCollaborator { .. }
        ))
    ));
    assert!(
        !market
            .registry
            .has_evidence(task_id)
            .await
            .expect("evidence lookup")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn authorization_failures_move_no_funds(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = task_under_review(&market, job_id).await;

    let result = market
        .service
        .approve_task(job_id, &account("worker1"), task_id)
        .await;

    assert!(matches!(
        result,
        Err(JobLifecycleError::Domain(JobDomainError::NotJobOwner { .. }))
    ));
    assert_eq!(
        market
            .ledger
            .balance_of(&account("worker1"))
            .await
            .expect("balance lookup"),
        taskpay::ledger::domain::Funds::ZERO
    );
    assert_eq!(
        market
            .service
            .escrow_balance(job_id)
            .await
            .expect("escrow lookup"),
        VALUE
    );
}
