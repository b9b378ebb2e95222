//! Given steps for the escrowed job lifecycle BDD scenarios.

use super::world::{MarketWorld, account, evidence, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskpay::job::services::CreateJobRequest;

#[given("a marketplace with a deployed job")]
fn a_marketplace_with_a_deployed_job(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    run_async(
        world
            .companies
            .register(account("company1"), "Apple", "apple.com"),
    )
    .wrap_err("register the company")?;
    run_async(world.workers.register(account("worker1"))).wrap_err("register worker1")?;
    run_async(world.workers.register(account("worker2"))).wrap_err("register worker2")?;
    let job = run_async(world.factory.create_job(
        account("company1"),
        CreateJobRequest::new("Create new website", "Help our company make something cool"),
    ))
    .wrap_err("deploy the job")?;
    world.job_id = Some(job.id());
    Ok(())
}

#[given("a funded task with evidence submitted by the first worker")]
fn a_funded_task_under_review(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let task_id = world.fund_and_add_task()?;
    let job_id = world.job()?;
    run_async(
        world
            .service
            .add_candidate(job_id, &account("worker1"), task_id),
    )
    .wrap_err("worker1 applies")?;
    run_async(
        world
            .service
            .add_candidate(job_id, &account("worker2"), task_id),
    )
    .wrap_err("worker2 applies")?;
    run_async(world.service.assign_task(
        job_id,
        &account("company1"),
        task_id,
        account("worker1"),
    ))
    .wrap_err("assign worker1")?;
    run_async(world.service.submit_task(
        job_id,
        &account("worker1"),
        task_id,
        evidence("www.checkthislink.com"),
    ))
    .wrap_err("submit evidence")?;
    world.task_id = Some(task_id);
    Ok(())
}

#[given("the company has rejected the task")]
fn the_company_has_rejected_the_task(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    let task_id = world.task()?;
    run_async(
        world
            .service
            .reject_task(job_id, &account("company1"), task_id),
    )
    .wrap_err("reject the task")
}

#[given("a funded task approved for the first worker")]
fn a_funded_task_approved_for_worker1(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let task_id = world.fund_and_add_task()?;
    world.drive_to_approval(task_id, "worker1")?;
    world.task_id = Some(task_id);
    Ok(())
}

#[given("a second funded task still open")]
fn a_second_funded_task_still_open(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let task_id = world.fund_and_add_task()?;
    world.second_task_id = Some(task_id);
    Ok(())
}

#[given("the company has completed the job")]
fn the_company_has_completed_the_job(world: &mut MarketWorld) -> Result<(), eyre::Report> {
    let job_id = world.job()?;
    run_async(world.service.complete_job(job_id, &account("company1")))
        .wrap_err("complete the job")
}
