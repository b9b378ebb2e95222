//! Integration tests for per-task and per-job serialization.

use rstest::rstest;
use taskpay::job::services::JobLifecycleError;
use taskpay::ledger::{domain::Funds, ports::Ledger};
use taskpay::task::{domain::TaskDomainError, services::TaskRegistryError};

use super::helpers::{
    VALUE, Market, account, add_funded_task, deploy_market_job, market, task_under_review,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_assignments_of_one_task_have_one_winner(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = add_funded_task(&market, job_id).await;

    let company = account("company1");
    let first = market.service.assign_task(
        job_id,
        &company,
        task_id,
        account("worker1"),
    );
    let second = market.service.assign_task(
        job_id,
        &company,
        task_id,
        account("worker2"),
    );
    let (left, right) = tokio::join!(first, second);

    let successes = usize::from(left.is_ok()) + usize::from(right.is_ok());
    assert_eq!(successes, 1, "exactly one racing assignment may win");

    let loser = if left.is_ok() { right } else { left };
    assert!(matches!(
        loser,
        Err(JobLifecycleError::Task(TaskRegistryError::Domain(
            TaskDomainError::TaskAlreadyAssigned(_)
        )))
    ));
    assert!(
        market
            .registry
            .is_assigned(task_id)
            .await
            .expect("assignment lookup")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_approvals_pay_exactly_once(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = task_under_review(&market, job_id).await;

    let company = account("company1");
    let first = market
        .service
        .approve_task(job_id, &company, task_id);
    let second = market
        .service
        .approve_task(job_id, &company, task_id);
    let (left, right) = tokio::join!(first, second);

    let successes = usize::from(left.is_ok()) + usize::from(right.is_ok());
    assert_eq!(successes, 1, "exactly one racing approval may win");
    assert_eq!(
        market
            .ledger
            .balance_of(&account("worker1"))
            .await
            .expect("balance lookup"),
        VALUE,
        "the compensation was paid exactly once"
    );
    assert_eq!(
        market
            .service
            .escrow_balance(job_id)
            .await
            .expect("escrow lookup"),
        Funds::ZERO
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn independent_jobs_proceed_concurrently(market: Market) {
    let first_job = deploy_market_job(&market).await;
    market
        .companies
        .register(account("company2"), "Orange", "orange.fr")
        .await
        .expect("second company registration");
    let second_job = market
        .factory
        .create_job(
            account("company2"),
            taskpay::job::services::CreateJobRequest::new("Translate the docs", "Into French"),
        )
        .await
        .expect("second job deployment");
    market
        .ledger
        .deposit(&account("company2"), VALUE)
        .await
        .expect("funding");
    market
        .ledger
        .deposit(&account("company1"), VALUE)
        .await
        .expect("funding");

    let first_company = account("company1");
    let second_company = account("company2");
    let first = market.service.add_task(
        first_job,
        &first_company,
        taskpay::job::services::AddTaskRequest::new("UIUX", "nice", VALUE, VALUE),
    );
    let second = market.service.add_task(
        second_job.id(),
        &second_company,
        taskpay::job::services::AddTaskRequest::new("Translation", "french", VALUE, VALUE),
    );
    let (left, right) = tokio::join!(first, second);

    let first_task = left.expect("first job task");
    let second_task = right.expect("second job task");
    assert_eq!(
        market.service.tasks(first_job).await.expect("task list"),
        [first_task]
    );
    assert_eq!(
        market
            .service
            .tasks(second_job.id())
            .await
            .expect("task list"),
        [second_task]
    );
}
