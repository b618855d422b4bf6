//! Approval requests applied to tasks in batches.

use super::{OptionId, TaskId};
use serde::{Deserialize, Serialize};

/// What an approval resolves a task with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalChoice {
    /// Approve one of the task's pending options.
    Option(OptionId),
    /// Approve free resolution text.
    Resolution(String),
}

/// A pending approval for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// The task being approved.
    pub task: TaskId,
    /// The approved option or resolution text.
    #[serde(flatten)]
    pub choice: ApprovalChoice,
}

impl Approval {
    /// Approves option `option` of task `task`.
    #[must_use]
    pub const fn option(task: TaskId, option: OptionId) -> Self {
        Self {
            task,
            choice: ApprovalChoice::Option(option),
        }
    }

    /// Approves `resolution` as the resolution of task `task`.
    #[must_use]
    pub fn resolution(task: TaskId, resolution: impl Into<String>) -> Self {
        Self {
            task,
            choice: ApprovalChoice::Resolution(resolution.into()),
        }
    }
}
