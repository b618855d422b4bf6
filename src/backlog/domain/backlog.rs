//! Backlog aggregate root and its lifecycle operations.
//!
//! Every operation is a pure function over the in-memory aggregate. Lookups
//! of unknown task identifiers return `None` and leave the backlog untouched.

use std::collections::BTreeMap;

use super::{
    Approval, ApprovalChoice, BacklogDomainError, ChangeQueue, HistoryEntry, Proposal, Task,
    TaskId, TaskStatus, TaskUpdate,
};
use serde::{Deserialize, Serialize};

/// Active tasks keyed by identifier plus the archived history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlog {
    tasks: BTreeMap<TaskId, Task>,
    history: Vec<HistoryEntry>,
}

/// Result of a mutation that may archive the task it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TaskChange {
    /// The task is still active.
    Active {
        /// The task after the change.
        task: Task,
    },
    /// The task was archived.
    Archived {
        /// The history entry recording the task.
        entry: HistoryEntry,
    },
}

impl Backlog {
    /// Creates an empty backlog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstructs a backlog from parsed document parts.
    #[must_use]
    pub const fn from_document(tasks: BTreeMap<TaskId, Task>, history: Vec<HistoryEntry>) -> Self {
        Self { tasks, history }
    }

    /// Returns active tasks in ascending identifier order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Returns the number of active tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the active task with the given identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Returns archived entries in archival order.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the identifier the next appended task receives.
    ///
    /// Only active identifiers are considered, so an identifier last used by
    /// an archived task can be handed out again.
    #[must_use]
    pub fn next_task_id(&self) -> TaskId {
        self.tasks
            .keys()
            .next_back()
            .map_or(TaskId::FIRST, |last| last.next())
    }

    /// Appends a new task that needs work.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyDescription`] when the description
    /// is blank.
    pub fn append_task(&mut self, description: &str) -> Result<&Task, BacklogDomainError> {
        let task = Task::new(self.next_task_id(), description)?;
        let id = task.id();
        Ok(self.tasks.entry(id).or_insert(task))
    }

    /// Appends one task per description, in order.
    ///
    /// Either every task is appended or, on a blank description, none are.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyDescription`] when any description
    /// is blank.
    pub fn append_tasks<'a>(
        &mut self,
        descriptions: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<Task>, BacklogDomainError> {
        let mut next_id = self.next_task_id();
        let mut created = Vec::new();
        for description in descriptions {
            created.push(Task::new(next_id, description)?);
            next_id = next_id.next();
        }
        for task in &created {
            self.tasks.insert(task.id(), task.clone());
        }
        Ok(created)
    }

    /// Attaches proposals to a task as new options, reopening it.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyOptionTitle`] when a proposal has no
    /// title.
    pub fn propose_fixes(
        &mut self,
        id: TaskId,
        proposals: impl IntoIterator<Item = Proposal>,
    ) -> Result<Option<&Task>, BacklogDomainError> {
        let Some(task) = self.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.propose(proposals)?;
        Ok(Some(task))
    }

    /// Approves `resolution` for a task, discarding its pending options.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyResolution`] when the resolution is
    /// blank; the task keeps its options.
    pub fn approve_resolution(
        &mut self,
        id: TaskId,
        resolution: &str,
    ) -> Result<Option<&Task>, BacklogDomainError> {
        let Some(task) = self.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.approve(resolution)?;
        Ok(Some(task))
    }

    /// Archives a task to history.
    ///
    /// Returns `None` when the task does not exist.
    pub fn mark_done(&mut self, id: TaskId, done_text: Option<&str>) -> Option<HistoryEntry> {
        let task = self.tasks.remove(&id)?;
        Some(self.archive(&task, done_text))
    }

    /// Moves a task to `status`.
    ///
    /// `Done` archives the task, `NeedsWork` clears its resolution and
    /// `Resolved` is accepted only for a task that already has one.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::ResolutionRequired`] when asked to
    /// resolve a task without a resolution.
    pub fn set_status(
        &mut self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<Option<TaskChange>, BacklogDomainError> {
        self.update_task(id, TaskUpdate::new().with_status(status))
    }

    /// Merges `update` into a task.
    ///
    /// Options supplied without a resolution reopen the task; a non-empty
    /// resolution after the merge discards every option. A `done` status
    /// archives the merged task. The task is unchanged if any field fails
    /// validation. Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError`] when a replacement description or
    /// option title is blank, or when `resolved` is requested for a task
    /// without a resolution.
    pub fn update_task(
        &mut self,
        id: TaskId,
        update: TaskUpdate,
    ) -> Result<Option<TaskChange>, BacklogDomainError> {
        let Some(current) = self.tasks.get(&id) else {
            return Ok(None);
        };
        let mut merged = current.clone();
        let TaskUpdate {
            description,
            resolution,
            options,
            status,
        } = update;

        if let Some(text) = description {
            merged.set_description(&text)?;
        }
        if let Some(proposals) = options {
            merged.replace_options(proposals)?;
            if resolution.is_none() && !merged.options().is_empty() {
                merged.reopen();
            }
        }
        if let Some(text) = resolution {
            merged.set_resolution(&text);
        }

        match status {
            Some(TaskStatus::Done) => {
                self.tasks.remove(&id);
                let entry = self.archive(&merged, None);
                Ok(Some(TaskChange::Archived { entry }))
            }
            Some(TaskStatus::Resolved) if merged.resolution().is_empty() => {
                Err(BacklogDomainError::ResolutionRequired(id))
            }
            Some(TaskStatus::NeedsWork) => {
                merged.reopen();
                Ok(Some(self.commit(merged)))
            }
            Some(TaskStatus::Resolved) | None => Ok(Some(self.commit(merged))),
        }
    }

    /// Returns active tasks whose derived status equals `status`.
    ///
    /// Done tasks live only in history, so `Done` never matches.
    #[must_use]
    pub fn find_tasks_by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .values()
            .filter(|task| task.status() == status)
            .collect()
    }

    /// Applies a batch of approvals in task-reference order.
    ///
    /// Approvals naming an unknown task or option, or carrying blank text,
    /// are skipped. The first applicable approval for a task wins and later
    /// ones for the same task are skipped. Returns the identifiers of the
    /// tasks that were resolved, each once, in application order.
    pub fn apply_approvals(&mut self, approvals: impl IntoIterator<Item = Approval>) -> Vec<TaskId> {
        let mut queue = ChangeQueue::new();
        for approval in approvals {
            queue.enqueue(approval.task.to_string(), approval);
        }

        let mut applied = Vec::new();
        for queued in queue.drain() {
            let Approval { task: id, choice } = queued.change;
            if applied.contains(&id) {
                continue;
            }
            let Some(task) = self.tasks.get_mut(&id) else {
                continue;
            };
            let resolution = match choice {
                ApprovalChoice::Option(option_id) => match task.option(option_id) {
                    Some(option) => option.as_resolution(),
                    None => continue,
                },
                ApprovalChoice::Resolution(text) => text,
            };
            if task.approve(&resolution).is_ok() {
                applied.push(id);
            }
        }
        applied
    }

    fn archive(&mut self, task: &Task, done_text: Option<&str>) -> HistoryEntry {
        let sequence = u64::try_from(self.history.len())
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        let entry = HistoryEntry::archive(task, sequence, done_text);
        self.history.push(entry.clone());
        entry
    }

    fn commit(&mut self, task: Task) -> TaskChange {
        self.tasks.insert(task.id(), task.clone());
        TaskChange::Active { task }
    }
}
