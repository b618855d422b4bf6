//! Behaviour tests for the backlog task lifecycle against files on disk.

#[path = "backlog_lifecycle_steps/mod.rs"]
mod backlog_lifecycle_steps_defs;

use backlog_lifecycle_steps_defs::world::{BacklogWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/backlog_lifecycle.feature",
    name = "Resolve and archive a task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn resolve_and_archive_task(world: BacklogWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/backlog_lifecycle.feature",
    name = "Identifiers continue after the highest active task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn identifiers_continue_after_highest_active(world: BacklogWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/backlog_lifecycle.feature",
    name = "Proposing a fix reopens a resolved task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn proposing_reopens_resolved_task(world: BacklogWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/backlog_lifecycle.feature",
    name = "Marking an unknown task done leaves the backlog unchanged"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_done_is_noop(world: BacklogWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/backlog_lifecycle.feature",
    name = "A task cannot be resolved without a resolution"
)]
#[tokio::test(flavor = "multi_thread")]
async fn resolving_requires_resolution(world: BacklogWorld) {
    let _ = world;
}
