//! When steps for backlog lifecycle BDD scenarios.

use super::world::{BacklogWorld, run_async};
use backlog_ledger::backlog::domain::{Proposal, TaskStatus};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"a task "{description}" is appended"#)]
fn task_is_appended(world: &mut BacklogWorld, description: String) -> Result<(), eyre::Report> {
    let task = run_async(world.service.append_task(world.kind, &description))
        .wrap_err("append task")?;
    world.last_task = Some(task);
    Ok(())
}

#[when(r#"option "{title}" is proposed for task {id:u64}"#)]
fn option_is_proposed(
    world: &mut BacklogWorld,
    title: String,
    id: u64,
) -> Result<(), eyre::Report> {
    let task_id = BacklogWorld::task_id(id)?;
    let task = run_async(
        world
            .service
            .propose_fix(world.kind, task_id, Proposal::from(title)),
    )
    .wrap_err("propose fix")?;
    world.last_task = task;
    Ok(())
}

#[when(r#"task {id:u64} is approved with "{resolution}""#)]
fn task_is_approved(
    world: &mut BacklogWorld,
    id: u64,
    resolution: String,
) -> Result<(), eyre::Report> {
    let task_id = BacklogWorld::task_id(id)?;
    let task = run_async(
        world
            .service
            .approve_resolution(world.kind, task_id, &resolution),
    )
    .wrap_err("approve resolution")?;
    world.last_task = task;
    Ok(())
}

#[when("task {id:u64} is marked done")]
fn task_is_marked_done(world: &mut BacklogWorld, id: u64) -> Result<(), eyre::Report> {
    let task_id = BacklogWorld::task_id(id)?;
    let entry = run_async(world.service.mark_done(world.kind, task_id, None))
        .wrap_err("mark task done")?;
    world.last_archived = Some(entry);
    Ok(())
}

#[when(r#"task {id:u64} is set to status "{status}""#)]
fn task_status_is_set(
    world: &mut BacklogWorld,
    id: u64,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = BacklogWorld::task_id(id)?;
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    if let Err(err) = run_async(world.service.set_status(world.kind, task_id, target)) {
        world.last_error = Some(err);
    }
    Ok(())
}
