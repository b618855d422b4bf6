//! Then steps for backlog lifecycle BDD scenarios.

use super::world::{BacklogWorld, run_async};
use backlog_ledger::backlog::{
    adapters::filesystem::FileBacklogStore,
    domain::{BacklogDomainError, Task, TaskStatus},
    ports::BacklogStore,
    services::BacklogServiceError,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

fn load_task(world: &BacklogWorld, id: u64) -> Result<Task, eyre::Report> {
    let task_id = BacklogWorld::task_id(id)?;
    run_async(world.service.get_task(world.kind, task_id))
        .wrap_err("get task")?
        .ok_or_else(|| eyre::eyre!("task {id} is not in the backlog"))
}

#[then("task {id:u64} has {count:usize} options")]
fn task_has_options(world: &BacklogWorld, id: u64, count: usize) -> Result<(), eyre::Report> {
    let task = load_task(world, id)?;
    if task.options().len() != count {
        return Err(eyre::eyre!(
            "expected {count} options, found {}",
            task.options().len()
        ));
    }
    Ok(())
}

#[then(r#"task {id:u64} is resolved as "{resolution}" with no options"#)]
fn task_is_resolved(
    world: &BacklogWorld,
    id: u64,
    resolution: String,
) -> Result<(), eyre::Report> {
    let task = load_task(world, id)?;
    if task.status() != TaskStatus::Resolved || task.resolution() != resolution {
        return Err(eyre::eyre!(
            "expected resolution {resolution:?}, found {:?}",
            task.resolution()
        ));
    }
    if !task.options().is_empty() {
        return Err(eyre::eyre!("resolved task still has options"));
    }
    Ok(())
}

#[then("task {id:u64} needs work with {count:usize} option")]
fn task_needs_work(world: &BacklogWorld, id: u64, count: usize) -> Result<(), eyre::Report> {
    let task = load_task(world, id)?;
    if task.status() != TaskStatus::NeedsWork {
        return Err(eyre::eyre!("expected needs_work, found {}", task.status().as_str()));
    }
    if task.options().len() != count {
        return Err(eyre::eyre!(
            "expected {count} options, found {}",
            task.options().len()
        ));
    }
    Ok(())
}

#[then("task {id:u64} is listed as approved")]
fn task_is_listed_as_approved(world: &BacklogWorld, id: u64) -> Result<(), eyre::Report> {
    let approved =
        run_async(world.service.get_approved_tasks(world.kind)).wrap_err("list approved")?;
    if !approved.iter().any(|task| task.id().value() == id) {
        return Err(eyre::eyre!("task {id} is not listed as approved"));
    }
    Ok(())
}

#[then("the backlog has no active tasks")]
fn backlog_has_no_active_tasks(world: &BacklogWorld) -> Result<(), eyre::Report> {
    backlog_has_active_tasks(world, 0)
}

#[then("the backlog has {count:usize} active task")]
fn backlog_has_active_tasks(world: &BacklogWorld, count: usize) -> Result<(), eyre::Report> {
    let loaded = run_async(world.service.load_backlog(world.kind)).wrap_err("load backlog")?;
    if loaded.backlog.task_count() != count {
        return Err(eyre::eyre!(
            "expected {count} active tasks, found {}",
            loaded.backlog.task_count()
        ));
    }
    Ok(())
}

#[then(r#"history entry {sequence:u64} records "{description}" resolved as "{resolution}""#)]
fn history_entry_records(
    world: &BacklogWorld,
    sequence: u64,
    description: String,
    resolution: String,
) -> Result<(), eyre::Report> {
    let loaded = run_async(world.service.load_backlog(world.kind)).wrap_err("load backlog")?;
    let entry = loaded
        .backlog
        .history()
        .iter()
        .find(|entry| entry.sequence() == sequence)
        .ok_or_else(|| eyre::eyre!("history entry {sequence} missing"))?;
    if entry.description() != description || entry.resolution() != resolution {
        return Err(eyre::eyre!(
            "unexpected history entry {:?} / {:?}",
            entry.description(),
            entry.resolution()
        ));
    }
    Ok(())
}

#[then("the document on disk reads back the same backlog")]
fn document_reads_back(world: &BacklogWorld) -> Result<(), eyre::Report> {
    let store = world.service.store();
    let reopened = FileBacklogStore::open(store.root().to_owned()).wrap_err("reopen root")?;
    let expected = run_async(store.load(world.kind)).wrap_err("load through service store")?;
    let actual = run_async(reopened.load(world.kind)).wrap_err("load through new store")?;
    if actual.backlog != expected.backlog {
        return Err(eyre::eyre!("reopened backlog differs"));
    }
    Ok(())
}

#[then("the last appended task has id {id:u64}")]
fn last_appended_task_has_id(world: &BacklogWorld, id: u64) -> Result<(), eyre::Report> {
    let task = world
        .last_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was appended"))?;
    if task.id().value() != id {
        return Err(eyre::eyre!("expected id {id}, found {}", task.id()));
    }
    Ok(())
}

#[then("no task was archived")]
fn no_task_was_archived(world: &BacklogWorld) -> Result<(), eyre::Report> {
    match world.last_archived {
        Some(None) => Ok(()),
        Some(Some(ref entry)) => Err(eyre::eyre!("unexpected archive of {:?}", entry.description())),
        None => Err(eyre::eyre!("mark done was not attempted")),
    }
}

#[then("the operation fails because a resolution is required")]
fn operation_requires_resolution(world: &BacklogWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the operation to fail"))?;
    if !matches!(
        error,
        BacklogServiceError::Domain(BacklogDomainError::ResolutionRequired(_))
    ) {
        return Err(eyre::eyre!("expected ResolutionRequired, got {error:?}"));
    }
    Ok(())
}
