//! Partial task updates.

use super::{Proposal, TaskStatus};
use serde::{Deserialize, Serialize};

/// Fields to merge into an existing task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskUpdate {
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement resolution; an empty string reopens the task.
    pub resolution: Option<String>,
    /// Replacement options, renumbered from 1.
    pub options: Option<Vec<Proposal>>,
    /// Target status; `done` archives the task after the other fields merge.
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    /// Sets the replacement options.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = Proposal>) -> Self {
        self.options = Some(options.into_iter().collect());
        self
    }

    /// Sets the target status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}
