//! Shared world state for backlog lifecycle BDD scenarios.

use std::sync::Arc;

use backlog_ledger::backlog::{
    adapters::filesystem::FileBacklogStore,
    domain::{BacklogKind, HistoryEntry, Task, TaskId},
    services::{BacklogService, BacklogServiceError},
};
use camino::Utf8PathBuf;
use rstest::fixture;
use tempfile::TempDir;

/// Service type used by the BDD world.
pub type TestBacklogService = BacklogService<FileBacklogStore>;

/// Scenario world holding a backlog rooted in a temporary directory.
pub struct BacklogWorld {
    pub service: TestBacklogService,
    pub kind: BacklogKind,
    pub last_task: Option<Task>,
    pub last_archived: Option<Option<HistoryEntry>>,
    pub last_error: Option<BacklogServiceError>,
    _root: TempDir,
}

impl BacklogWorld {
    /// Creates a world with a fresh backlog root.
    ///
    /// # Panics
    ///
    /// Panics when the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let root = TempDir::new().expect("temporary backlog root");
        let path = Utf8PathBuf::from_path_buf(root.path().to_path_buf())
            .expect("temporary path is UTF-8");
        let store = FileBacklogStore::open(path).expect("backlog root opens");

        Self {
            service: BacklogService::new(Arc::new(store)),
            kind: BacklogKind::Specs,
            last_task: None,
            last_archived: None,
            last_error: None,
            _root: root,
        }
    }

    /// Builds a task identifier from a scenario number.
    pub fn task_id(value: u64) -> Result<TaskId, eyre::Report> {
        TaskId::new(value).map_err(|err| eyre::eyre!("invalid task id in scenario: {err}"))
    }
}

impl Default for BacklogWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BacklogWorld {
    BacklogWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
