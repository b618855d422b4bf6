//! Service layer exposing backlog operations to skills.
//!
//! Every operation performs a complete load, mutate and save cycle against
//! the store. Operations on the same document are serialised across every
//! service in the process; nothing guards against other processes writing
//! the same document between a load and the following save.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex as StdMutex, PoisonError};

use crate::backlog::{
    domain::{
        Approval, Backlog, BacklogDomainError, BacklogKind, HistoryEntry, Proposal, Task,
        TaskChange, TaskId, TaskStatus, TaskUpdate,
    },
    grammar::{self, ListItem},
    ports::{BacklogStore, BacklogStoreError, LoadedBacklog},
};
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Service-level errors for backlog operations.
#[derive(Debug, Error)]
pub enum BacklogServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BacklogDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] BacklogStoreError),
}

/// Result type for backlog service operations.
pub type BacklogServiceResult<T> = Result<T, BacklogServiceError>;

/// Outcome of a mutation, telling the service whether to save.
enum Mutation<T> {
    Changed(T),
    Unchanged(T),
}

fn changed_if_found<T>(value: Option<T>) -> Mutation<Option<T>> {
    match value {
        Some(found) => Mutation::Changed(Some(found)),
        None => Mutation::Unchanged(None),
    }
}

type DocumentGuard = Arc<Mutex<()>>;

/// Single-flight guards shared by every service in the process, keyed by
/// [`BacklogStore::document_key`].
static DOCUMENT_GUARDS: LazyLock<StdMutex<HashMap<String, DocumentGuard>>> =
    LazyLock::new(|| StdMutex::new(HashMap::new()));

fn document_guard(key: String) -> DocumentGuard {
    let mut guards = DOCUMENT_GUARDS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(guards.entry(key).or_default())
}

/// Backlog orchestration service over a [`BacklogStore`].
#[derive(Debug)]
pub struct BacklogService<S>
where
    S: BacklogStore,
{
    store: Arc<S>,
}

impl<S> Clone for BacklogService<S>
where
    S: BacklogStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> BacklogService<S>
where
    S: BacklogStore,
{
    /// Creates a new backlog service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Creates an empty backlog document for `kind` if none exists.
    ///
    /// Returns `true` when a document was created.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Store`] when creation fails.
    pub async fn create_backlog(&self, kind: BacklogKind) -> BacklogServiceResult<bool> {
        let _guard = self.lock_document(kind).await;
        Ok(self.store.create(kind).await?)
    }

    /// Loads the backlog for `kind` with its document metadata.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Store`] when the document is missing or
    /// unreadable.
    pub async fn load_backlog(&self, kind: BacklogKind) -> BacklogServiceResult<LoadedBacklog> {
        let _guard = self.lock_document(kind).await;
        Ok(self.store.load(kind).await?)
    }

    /// Returns an active task, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Store`] when loading fails.
    pub async fn get_task(&self, kind: BacklogKind, id: TaskId) -> BacklogServiceResult<Option<Task>> {
        let loaded = self.load_backlog(kind).await?;
        Ok(loaded.backlog.task(id).cloned())
    }

    /// Returns active tasks whose derived status equals `status`.
    ///
    /// Archived tasks are never returned, even for [`TaskStatus::Done`].
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Store`] when loading fails.
    pub async fn find_tasks_by_status(
        &self,
        kind: BacklogKind,
        status: TaskStatus,
    ) -> BacklogServiceResult<Vec<Task>> {
        let loaded = self.load_backlog(kind).await?;
        Ok(loaded
            .backlog
            .find_tasks_by_status(status)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Returns tasks that have an approved resolution.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Store`] when loading fails.
    pub async fn get_approved_tasks(&self, kind: BacklogKind) -> BacklogServiceResult<Vec<Task>> {
        self.find_tasks_by_status(kind, TaskStatus::Resolved).await
    }

    /// Returns tasks that still need work.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Store`] when loading fails.
    pub async fn get_new_tasks(&self, kind: BacklogKind) -> BacklogServiceResult<Vec<Task>> {
        self.find_tasks_by_status(kind, TaskStatus::NeedsWork).await
    }

    /// Appends a task that needs work and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Domain`] when the description is blank
    /// or [`BacklogServiceError::Store`] when persistence fails.
    pub async fn append_task(
        &self,
        kind: BacklogKind,
        description: &str,
    ) -> BacklogServiceResult<Task> {
        self.mutate(kind, |backlog| {
            let task = backlog.append_task(description)?.clone();
            Ok(Mutation::Changed(task))
        })
        .await
    }

    /// Appends one task per list item in `text`.
    ///
    /// Text without list items becomes a single task.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Domain`] when the text is blank or
    /// [`BacklogServiceError::Store`] when persistence fails.
    pub async fn add_tasks_from_text(
        &self,
        kind: BacklogKind,
        text: &str,
    ) -> BacklogServiceResult<Vec<Task>> {
        let descriptions: Vec<String> = list_items_or_whole(text)
            .into_iter()
            .map(|item| join_item(&item))
            .collect();
        self.mutate(kind, |backlog| {
            let created = backlog.append_tasks(descriptions.iter().map(String::as_str))?;
            Ok(Mutation::Changed(created))
        })
        .await
    }

    /// Attaches a proposal to a task as a new option, reopening the task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Domain`] when the proposal has no title
    /// or [`BacklogServiceError::Store`] when persistence fails.
    pub async fn propose_fix(
        &self,
        kind: BacklogKind,
        id: TaskId,
        proposal: Proposal,
    ) -> BacklogServiceResult<Option<Task>> {
        self.propose_fixes(kind, id, vec![proposal]).await
    }

    /// Attaches every list item in `text` to a task as options.
    ///
    /// Numbered and bulleted items may be mixed; text without list items
    /// becomes a single option. Returns `Ok(None)` when the task does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Domain`] when the text is blank or a
    /// detail line reads `# History`, or [`BacklogServiceError::Store`] when
    /// persistence fails.
    pub async fn add_options_from_text(
        &self,
        kind: BacklogKind,
        id: TaskId,
        text: &str,
    ) -> BacklogServiceResult<Option<Task>> {
        let proposals = list_items_or_whole(text)
            .into_iter()
            .map(|item| Proposal::structured(item.title, item.details))
            .collect();
        self.propose_fixes(kind, id, proposals).await
    }

    async fn propose_fixes(
        &self,
        kind: BacklogKind,
        id: TaskId,
        proposals: Vec<Proposal>,
    ) -> BacklogServiceResult<Option<Task>> {
        self.mutate(kind, |backlog| {
            let task = backlog.propose_fixes(id, proposals)?.cloned();
            Ok(changed_if_found(task))
        })
        .await
    }

    /// Approves `resolution` for a task, discarding its options.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Domain`] when the resolution is blank
    /// or [`BacklogServiceError::Store`] when persistence fails.
    pub async fn approve_resolution(
        &self,
        kind: BacklogKind,
        id: TaskId,
        resolution: &str,
    ) -> BacklogServiceResult<Option<Task>> {
        self.mutate(kind, |backlog| {
            Ok(changed_if_found(
                backlog.approve_resolution(id, resolution)?.cloned(),
            ))
        })
        .await
    }

    /// Moves a task to `status`; `done` archives it.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Domain`] when the transition is not
    /// possible or [`BacklogServiceError::Store`] when persistence fails.
    pub async fn set_status(
        &self,
        kind: BacklogKind,
        id: TaskId,
        status: TaskStatus,
    ) -> BacklogServiceResult<Option<TaskChange>> {
        self.mutate(kind, |backlog| {
            Ok(changed_if_found(backlog.set_status(id, status)?))
        })
        .await
    }

    /// Merges `update` into a task.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Domain`] when a merged field is invalid
    /// or [`BacklogServiceError::Store`] when persistence fails.
    pub async fn update_task(
        &self,
        kind: BacklogKind,
        id: TaskId,
        update: TaskUpdate,
    ) -> BacklogServiceResult<Option<TaskChange>> {
        self.mutate(kind, |backlog| {
            Ok(changed_if_found(backlog.update_task(id, update)?))
        })
        .await
    }

    /// Archives a task to history.
    ///
    /// The recorded resolution is `done_text` when given and non-blank, then
    /// the task's resolution, then `"Executed."`. Returns `Ok(None)` when the
    /// task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Store`] when persistence fails.
    pub async fn mark_done(
        &self,
        kind: BacklogKind,
        id: TaskId,
        done_text: Option<&str>,
    ) -> BacklogServiceResult<Option<HistoryEntry>> {
        let entry = self
            .mutate(kind, |backlog| {
                Ok(changed_if_found(backlog.mark_done(id, done_text)))
            })
            .await?;
        if let Some(archived) = &entry {
            tracing::info!(%kind, task_id = %id, sequence = archived.sequence(), "archived task");
        }
        Ok(entry)
    }

    /// Applies a batch of approvals in one load and save cycle.
    ///
    /// Approvals are ordered by task reference before they are applied.
    /// Returns the identifiers of the tasks that were resolved.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogServiceError::Store`] when persistence fails.
    pub async fn apply_approvals(
        &self,
        kind: BacklogKind,
        approvals: Vec<Approval>,
    ) -> BacklogServiceResult<Vec<TaskId>> {
        let requested = approvals.len();
        let applied = self
            .mutate(kind, |backlog| {
                let applied = backlog.apply_approvals(approvals);
                if applied.is_empty() {
                    Ok(Mutation::Unchanged(applied))
                } else {
                    Ok(Mutation::Changed(applied))
                }
            })
            .await?;
        tracing::info!(%kind, requested, applied = applied.len(), "applied approvals");
        Ok(applied)
    }

    async fn lock_document(&self, kind: BacklogKind) -> OwnedMutexGuard<()> {
        document_guard(self.store.document_key(kind)).lock_owned().await
    }

    async fn mutate<T, F>(&self, kind: BacklogKind, operation: F) -> BacklogServiceResult<T>
    where
        F: FnOnce(&mut Backlog) -> Result<Mutation<T>, BacklogDomainError>,
    {
        let _guard = self.lock_document(kind).await;
        let LoadedBacklog { mut backlog, .. } = self.store.load(kind).await?;
        match operation(&mut backlog)? {
            Mutation::Changed(value) => {
                self.store.save(kind, &backlog).await?;
                Ok(value)
            }
            Mutation::Unchanged(value) => Ok(value),
        }
    }
}

/// Reads list items from `text`, treating item-free text as one item.
fn list_items_or_whole(text: &str) -> Vec<ListItem> {
    let items = grammar::parse_list_items(text);
    if items.is_empty() {
        return vec![ListItem {
            title: text.to_owned(),
            details: String::new(),
        }];
    }
    items
}

fn join_item(item: &ListItem) -> String {
    if item.details.is_empty() {
        return item.title.clone();
    }
    format!("{} {}", item.title, item.details)
}
