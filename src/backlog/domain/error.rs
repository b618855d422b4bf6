//! Error types for backlog domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating backlog domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BacklogDomainError {
    /// The backlog kind is not one of the supported categories.
    #[error("invalid kind: {0}")]
    InvalidKind(String),

    /// Task identifiers start at 1.
    #[error("invalid task id {0}, expected a positive integer")]
    InvalidTaskId(u64),

    /// The task identifier text is not a number.
    #[error("malformed task id '{0}'")]
    MalformedTaskId(String),

    /// Option identifiers start at 1.
    #[error("invalid option id {0}, expected a positive integer")]
    InvalidOptionId(u32),

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The option title is empty after trimming.
    #[error("option title must not be empty")]
    EmptyOptionTitle,

    /// Approved resolution text is empty after trimming.
    #[error("resolution must not be empty")]
    EmptyResolution,

    /// An option detail line would read back as the history marker.
    #[error("option details must not contain a line reading '{0}'")]
    ReservedDetailLine(String),

    /// The task cannot be marked resolved without resolution text.
    #[error("task {0} has no resolution to mark as resolved")]
    ResolutionRequired(TaskId),
}

/// Error returned while parsing a task status label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
