//! Integration tests for the funded task lifecycle and payout paths.

use rstest::rstest;
use taskpay::job::services::JobLifecycleError;
use taskpay::ledger::{domain::Funds, ports::Ledger};
use taskpay::task::{
    domain::{TaskDomainError, TaskEvent},
    services::TaskRegistryError,
};

use super::helpers::{
    VALUE, Market, account, add_funded_task, deploy_market_job, evidence, market,
    task_under_review,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_pays_the_assignee_and_empties_escrow(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = task_under_review(&market, job_id).await;

    market
        .service
        .approve_task(job_id, &account("company1"), task_id)
        .await
        .expect("approval");

    assert_eq!(
        market
            .ledger
            .balance_of(&account("worker1"))
            .await
            .expect("balance lookup"),
        VALUE
    );
    assert_eq!(
        market
            .service
            .escrow_balance(job_id)
            .await
            .expect("escrow lookup"),
        Funds::ZERO
    );
    assert!(
        market
            .registry
            .is_completed_task(task_id)
            .await
            .expect("completion lookup")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_resets_evidence_and_moves_nothing(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = task_under_review(&market, job_id).await;

    market
        .service
        .reject_task(job_id, &account("company1"), task_id)
        .await
        .expect("rejection");

    assert!(
        !market
            .registry
            .has_evidence(task_id)
            .await
            .expect("evidence lookup")
    );
    assert!(
        !market
            .registry
            .is_completed_task(task_id)
            .await
            .expect("completion lookup")
    );
    assert_eq!(
        market
            .ledger
            .balance_of(&account("worker1"))
            .await
            .expect("balance lookup"),
        Funds::ZERO
    );
    assert_eq!(
        market
            .service
            .escrow_balance(job_id)
            .await
            .expect("escrow lookup"),
        VALUE,
        "rejected work keeps the funds in escrow"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_after_rejection_pays_the_second_worker(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = task_under_review(&market, job_id).await;
    market
        .service
        .reject_task(job_id, &account("company1"), task_id)
        .await
        .expect("rejection");

    market
        .service
        .reassign_task(job_id, &account("company1"), task_id, account("worker2"))
        .await
        .expect("reassignment");
    assert!(
        !market
            .service
            .is_collaborator(job_id, &account("worker1"))
            .await
            .expect("collaborator lookup"),
        "the first worker left the collaborator set on reassignment"
    );
    assert!(
        market
            .service
            .is_collaborator(job_id, &account("worker2"))
            .await
            .expect("collaborator lookup")
    );

    market
        .service
        .submit_task(
            job_id,
            &account("worker2"),
            task_id,
            evidence("www.secondtry.example"),
        )
        .await
        .expect("submission");
    market
        .service
        .approve_task(job_id, &account("company1"), task_id)
        .await
        .expect("approval");

    assert_eq!(
        market
            .ledger
            .balance_of(&account("worker2"))
            .await
            .expect("balance lookup"),
        VALUE
    );
    assert_eq!(
        market
            .ledger
            .balance_of(&account("worker1"))
            .await
            .expect("balance lookup"),
        Funds::ZERO
    );
    assert!(
        !market
            .service
            .is_collaborator(job_id, &account("worker2"))
            .await
            .expect("collaborator lookup"),
        "approval removed the second worker from the collaborator set"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approving_twice_never_moves_funds_again(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = task_under_review(&market, job_id).await;
    market
        .service
        .approve_task(job_id, &account("company1"), task_id)
        .await
        .expect("approval");

    let again = market
        .service
        .approve_task(job_id, &account("company1"), task_id)
        .await;

    assert!(matches!(
        again,
        Err(JobLifecycleError::Task(TaskRegistryError::Domain(
            TaskDomainError::TaskAlreadyComplete(_)
        )))
    ));
    assert_eq!(
        market
            .ledger
            .balance_of(&account("worker1"))
            .await
            .expect("balance lookup"),
        VALUE,
        "the assignee was paid exactly once"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_event_log_keeps_the_approval_history(market: Market) {
    let job_id = deploy_market_job(&market).await;
    let task_id = task_under_review(&market, job_id).await;
    market
        .service
        .approve_task(job_id, &account("company1"), task_id)
        .await
        .expect("approval");

    let events = market
        .registry
        .events_for_task(task_id)
        .await
        .expect("event lookup");

    let approvals = events
        .iter()
        .filter(|event| matches!(event, TaskEvent::Approved { .. }))
        .count();
    assert_eq!(approvals, 1);
    assert!(events.iter().any(|event| matches!(
        event,
        TaskEvent::Approved { assigned_to, endorsed_by, .. }
            if *assigned_to == account("worker1") && *endorsed_by == account("company1")
    )));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn escrow_accumulates_across_tasks(market: Market) {
    let job_id = deploy_market_job(&market).await;

    let first = add_funded_task(&market, job_id).await;
    let second = add_funded_task(&market, job_id).await;

    assert_eq!(
        market.service.tasks(job_id).await.expect("task list"),
        [first, second]
    );
    assert_eq!(
        market
            .service
            .escrow_balance(job_id)
            .await
            .expect("escrow lookup"),
        Funds::new(20_000)
    );
}
