//! Filesystem adapter tests against a temporary root directory.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::backlog::{
    adapters::filesystem::FileBacklogStore,
    domain::{Backlog, BacklogKind, Proposal, TaskId},
    ports::{BacklogStore, BacklogStoreError},
    services::BacklogService,
};

struct Workspace {
    _temp: TempDir,
    root: Utf8PathBuf,
    store: FileBacklogStore,
}

impl Workspace {
    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.root.join(name)).expect("document readable")
    }

    fn staging_files(&self) -> Vec<String> {
        std::fs::read_dir(&self.root)
            .expect("root readable")
            .map(|entry| {
                entry
                    .expect("entry readable")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .filter(|name| name.ends_with(".tmp"))
            .collect()
    }
}

#[fixture]
fn workspace() -> Workspace {
    let temp = TempDir::new().expect("temporary directory");
    let root = Utf8Path::from_path(temp.path())
        .expect("temporary path is UTF-8")
        .to_owned();
    let store = FileBacklogStore::open(root.clone()).expect("store opens");
    Workspace {
        _temp: temp,
        root,
        store,
    }
}

#[rstest]
fn open_rejects_missing_root() {
    let result = FileBacklogStore::open("/definitely/not/a/backlog/root");

    assert!(matches!(
        result,
        Err(BacklogStoreError::Io { action: "open", .. })
    ));
}

#[rstest]
fn document_path_names_kind_file(workspace: Workspace) {
    assert_eq!(
        workspace.store.document_path(BacklogKind::Docs),
        workspace.root.join("docs_backlog.md")
    );
    assert_eq!(workspace.store.root(), workspace.root.as_path());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_of_missing_document_is_not_found(workspace: Workspace) {
    let result = workspace.store.load(BacklogKind::Specs).await;

    assert!(matches!(
        result,
        Err(BacklogStoreError::NotFound { ref path }) if path.ends_with("specs_backlog.md")
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_writes_empty_document_once(workspace: Workspace) {
    let first = workspace
        .store
        .create(BacklogKind::Specs)
        .await
        .expect("create succeeds");
    let second = workspace
        .store
        .create(BacklogKind::Specs)
        .await
        .expect("create succeeds");

    assert!(first);
    assert!(!second);
    assert_eq!(workspace.read("specs_backlog.md"), "");
    let loaded = workspace
        .store
        .load(BacklogKind::Specs)
        .await
        .expect("load succeeds");
    assert_eq!(loaded.backlog, Backlog::new());
    assert_eq!(loaded.meta.size, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn save_writes_canonical_text_and_load_restores_it(workspace: Workspace) {
    let mut backlog = Backlog::new();
    backlog.append_task("Fix login bug").expect("valid description");
    let id = TaskId::new(1).expect("valid task id");
    backlog
        .propose_fixes(id, [Proposal::structured("Patch A", "Reset cookie")])
        .expect("valid proposal");

    workspace
        .store
        .save(BacklogKind::Docs, &backlog)
        .await
        .expect("save succeeds");

    let text = workspace.read("docs_backlog.md");
    assert_eq!(
        text,
        "## 1\n\n**Description:** Fix login bug\n\n**Options:**\n1. Patch A\n   Reset cookie\n"
    );
    let loaded = workspace
        .store
        .load(BacklogKind::Docs)
        .await
        .expect("load succeeds");
    assert_eq!(loaded.backlog, backlog);
    assert_eq!(loaded.meta.size, u64::try_from(text.len()).expect("small file"));
    assert!(workspace.staging_files().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn kinds_are_stored_in_separate_documents(workspace: Workspace) {
    let mut specs = Backlog::new();
    specs.append_task("Spec work").expect("valid description");

    workspace
        .store
        .save(BacklogKind::Specs, &specs)
        .await
        .expect("save succeeds");

    assert!(matches!(
        workspace.store.load(BacklogKind::Docs).await,
        Err(BacklogStoreError::NotFound { .. })
    ));
}

#[rstest]
fn stores_on_one_root_share_document_keys(workspace: Workspace) {
    let other = FileBacklogStore::open(workspace.root.join(".")).expect("store opens");

    assert_eq!(
        workspace.store.document_key(BacklogKind::Specs),
        other.document_key(BacklogKind::Specs)
    );
    assert_ne!(
        workspace.store.document_key(BacklogKind::Specs),
        workspace.store.document_key(BacklogKind::Docs)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn appends_through_separate_stores_on_one_root_keep_every_task(workspace: Workspace) {
    let first = Arc::new(workspace.store.clone());
    let second = Arc::new(FileBacklogStore::open(workspace.root.clone()).expect("store opens"));
    BacklogService::new(Arc::clone(&first))
        .create_backlog(BacklogKind::Specs)
        .await
        .expect("create succeeds");

    let mut handles = Vec::new();
    for index in 0..24 {
        let store = if index % 2 == 0 { &first } else { &second };
        let worker = BacklogService::new(Arc::clone(store));
        handles.push(tokio::spawn(async move {
            worker
                .append_task(BacklogKind::Specs, &format!("task {index}"))
                .await
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("task joins")
            .expect("append succeeds");
    }

    let loaded = workspace
        .store
        .load(BacklogKind::Specs)
        .await
        .expect("load succeeds");
    assert_eq!(loaded.backlog.task_count(), 24);
    for value in 1..=24 {
        let id = TaskId::new(value).expect("valid task id");
        assert!(loaded.backlog.task(id).is_some(), "task {value} missing");
    }
    assert!(workspace.staging_files().is_empty());
}
