//! Deterministic ordering for batches of pending changes.

use serde::{Deserialize, Serialize};

/// A change queued against a task reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedChange<C> {
    /// Reference of the task the change targets.
    pub task_ref: String,
    /// The queued change payload.
    pub change: C,
}

/// Collects changes for many tasks and releases them in task-reference order.
///
/// Draining sorts lexicographically by task reference so that applying a
/// batch does not depend on the order in which changes arrived. Changes for
/// the same reference keep their enqueue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeQueue<C> {
    queue: Vec<QueuedChange<C>>,
}

impl<C> ChangeQueue<C> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues `change` against `task_ref`.
    pub fn enqueue(&mut self, task_ref: impl Into<String>, change: C) {
        self.queue.push(QueuedChange {
            task_ref: task_ref.into(),
            change,
        });
    }

    /// Returns every queued change sorted by task reference and empties the
    /// queue.
    pub fn drain(&mut self) -> Vec<QueuedChange<C>> {
        let mut changes = std::mem::take(&mut self.queue);
        changes.sort_by(|left, right| left.task_ref.cmp(&right.task_ref));
        changes
    }

    /// Discards every queued change.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Returns the number of queued changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue holds no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<C> Default for ChangeQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}
