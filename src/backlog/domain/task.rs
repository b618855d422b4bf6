//! Task entity and its derived lifecycle status.

use super::{BacklogDomainError, OptionId, ParseTaskStatusError, Proposal, TaskId, TaskOption, text};
use serde::{Deserialize, Serialize};

/// Lifecycle status derived from a task's fields.
///
/// Status is never stored: a task with no resolution needs work, a task with
/// a resolution is resolved, and a done task only exists as a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum TaskStatus {
    /// The task has no approved resolution yet.
    NeedsWork,
    /// A resolution has been approved and pending options discarded.
    Resolved,
    /// The task has been archived to history.
    Done,
}

impl TaskStatus {
    /// Returns the canonical status label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NeedsWork => "needs_work",
            Self::Resolved => "resolved",
            Self::Done => "done",
        }
    }

    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "needs_work" | "new" => Ok(Self::NeedsWork),
            "resolved" | "approved" | "ok" => Ok(Self::Resolved),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// A unit of pending or resolved work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    description: String,
    options: Vec<TaskOption>,
    resolution: String,
}

impl Task {
    /// Creates a task that needs work, with no options and no resolution.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyDescription`] when the description
    /// is blank.
    pub fn new(id: TaskId, description: &str) -> Result<Self, BacklogDomainError> {
        let normalized = text::single_line(description);
        if normalized.is_empty() {
            return Err(BacklogDomainError::EmptyDescription);
        }
        Ok(Self {
            id,
            description: normalized,
            options: Vec::new(),
            resolution: String::new(),
        })
    }

    /// Reconstructs a task read back from a backlog document.
    ///
    /// No validation is applied; the document may hold hand-edited content.
    #[must_use]
    pub const fn from_document(
        id: TaskId,
        description: String,
        options: Vec<TaskOption>,
        resolution: String,
    ) -> Self {
        Self {
            id,
            description,
            options,
            resolution,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the pending options in insertion order.
    #[must_use]
    pub fn options(&self) -> &[TaskOption] {
        &self.options
    }

    /// Returns the option with the given identifier, if present.
    #[must_use]
    pub fn option(&self, id: OptionId) -> Option<&TaskOption> {
        self.options.iter().find(|option| option.id() == id)
    }

    /// Returns the approved resolution, empty when unresolved.
    #[must_use]
    pub fn resolution(&self) -> &str {
        &self.resolution
    }

    /// Returns the derived lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        if self.resolution.is_empty() {
            TaskStatus::NeedsWork
        } else {
            TaskStatus::Resolved
        }
    }

    /// Appends proposals as new options and reopens the task.
    ///
    /// Numbering continues from the current option count. Any existing
    /// resolution is cleared, even when the task was already resolved.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyOptionTitle`] when a proposal has no
    /// title, or [`BacklogDomainError::ReservedDetailLine`] when its details
    /// hold a history marker line. The task is left unchanged in that case.
    pub fn propose(
        &mut self,
        proposals: impl IntoIterator<Item = Proposal>,
    ) -> Result<(), BacklogDomainError> {
        let start = self.options.len();
        let additions = proposals
            .into_iter()
            .enumerate()
            .map(|(offset, proposal)| {
                proposal.into_option(OptionId::from_index(start.saturating_add(offset)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.options.extend(additions);
        self.resolution.clear();
        Ok(())
    }

    /// Approves `resolution` and discards every pending option.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyResolution`] when the resolution is
    /// blank. The task is left unchanged in that case.
    pub fn approve(&mut self, resolution: &str) -> Result<(), BacklogDomainError> {
        let normalized = text::single_line(resolution);
        if normalized.is_empty() {
            return Err(BacklogDomainError::EmptyResolution);
        }
        self.resolution = normalized;
        self.options.clear();
        Ok(())
    }

    /// Replaces the resolution, discarding options only when it is non-empty.
    pub fn set_resolution(&mut self, resolution: &str) {
        self.resolution = text::single_line(resolution);
        if !self.resolution.is_empty() {
            self.options.clear();
        }
    }

    /// Clears the resolution so the task needs work again.
    pub fn reopen(&mut self) {
        self.resolution.clear();
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyDescription`] when the description
    /// is blank.
    pub fn set_description(&mut self, description: &str) -> Result<(), BacklogDomainError> {
        let normalized = text::single_line(description);
        if normalized.is_empty() {
            return Err(BacklogDomainError::EmptyDescription);
        }
        self.description = normalized;
        Ok(())
    }

    /// Replaces every option, renumbering them from 1.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyOptionTitle`] when a proposal has no
    /// title, or [`BacklogDomainError::ReservedDetailLine`] when its details
    /// hold a history marker line.
    pub fn replace_options(
        &mut self,
        proposals: impl IntoIterator<Item = Proposal>,
    ) -> Result<(), BacklogDomainError> {
        self.options = proposals
            .into_iter()
            .enumerate()
            .map(|(index, proposal)| proposal.into_option(OptionId::from_index(index)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(())
    }
}
