//! When steps for the escrowed job lifecycle BDD scenarios.

use super::world::{MarketWorld, VALUE, account, evidence, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskpay::job::services::AddTaskRequest;
use taskpay::ledger::ports::Ledger;

#[when("the company approves the task")]
fn the_company_approves_the_task(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    let task_id = world.task()?;
    run_async(
        world
            .service
            .approve_task(job_id, &account("company1"), task_id),
    )
    .wrap_err("approve the task")
}

#[when("the company rejects the task")]
fn the_company_rejects_the_task(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    let task_id = world.task()?;
    run_async(
        world
            .service
            .reject_task(job_id, &account("company1"), task_id),
    )
    .wrap_err("reject the task")
}

#[when("the company reassigns the task to the second worker")]
fn the_company_reassigns_to_worker2(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    let task_id = world.task()?;
    run_async(world.service.reassign_task(
        job_id,
        &account("company1"),
        task_id,
        account("worker2"),
    ))
    .wrap_err("reassign the task")
}

#[when("the second worker submits evidence")]
fn the_second_worker_submits_evidence(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    let task_id = world.task()?;
    run_async(world.service.submit_task(
        job_id,
        &account("worker2"),
        task_id,
        evidence("www.secondtry.example"),
    ))
    .wrap_err("submit evidence as worker2")
}

#[when("the company tries to complete the job")]
fn the_company_tries_to_complete_the_job(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    world.last_completion = Some(run_async(
        world.service.complete_job(job_id, &account("company1")),
    ));
    Ok(())
}

#[when("the second task is driven to approval")]
fn the_second_task_is_driven_to_approval(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .second_task_id
        .ok_or_else(|| eyre::eyre!("no second task in scenario world"))?;
    world.drive_to_approval(task_id, "worker2")
}

#[when("the company completes the job")]
fn the_company_completes_the_job(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    run_async(world.service.complete_job(job_id, &account("company1")))
        .wrap_err("complete the job")
}

#[when("the company tries to add another funded task")]
fn the_company_tries_to_add_another_funded_task(
    world: &mut MarketWorld,
) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    run_async(world.ledger.deposit(&account("company1"), VALUE))
        .wrap_err("fund the company")?;
    world.last_addition = Some(run_async(world.service.add_task(
        job_id,
        &account("company1"),
        AddTaskRequest::new("Video", "I want it to be 10 minutes long!", VALUE, VALUE),
    )));
    Ok(())
}
