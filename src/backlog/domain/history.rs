//! Archived records of completed tasks.

use super::{Task, text};
use serde::{Deserialize, Serialize};

/// Resolution recorded when a task is archived without any resolution text.
pub const DEFAULT_DONE_RESOLUTION: &str = "Executed.";

/// Line separating active tasks from archived history in a document.
pub const HISTORY_MARKER: &str = "# History";

/// Immutable record of a task that has been marked done.
///
/// The sequence number is the entry's 1-based position in the history and
/// has no relationship to the archived task's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    sequence: u64,
    description: String,
    resolution: String,
}

impl HistoryEntry {
    /// Archives `task` as history entry number `sequence`.
    ///
    /// The recorded resolution is `done_text` when it is non-blank, otherwise
    /// the task's own resolution, otherwise [`DEFAULT_DONE_RESOLUTION`].
    #[must_use]
    pub fn archive(task: &Task, sequence: u64, done_text: Option<&str>) -> Self {
        let explicit = done_text.map(text::single_line).unwrap_or_default();
        let resolution = if !explicit.is_empty() {
            explicit
        } else if !task.resolution().is_empty() {
            task.resolution().to_owned()
        } else {
            DEFAULT_DONE_RESOLUTION.to_owned()
        };
        Self {
            sequence,
            description: task.description().to_owned(),
            resolution,
        }
    }

    /// Reconstructs an entry read back from a backlog document.
    #[must_use]
    pub const fn from_document(sequence: u64, description: String, resolution: String) -> Self {
        Self {
            sequence,
            description,
            resolution,
        }
    }

    /// Returns the 1-based position of this entry in the history.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the description copied from the archived task.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the recorded resolution.
    #[must_use]
    pub fn resolution(&self) -> &str {
        &self.resolution
    }
}
