//! Identifier and validated scalar types for the backlog domain.

use super::BacklogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric identifier of an active task.
///
/// Identifiers are unique among active tasks only. Archived tasks keep no
/// claim on their old number, so a later task may be assigned it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct TaskId(u64);

impl TaskId {
    /// The identifier assigned to the first task of an empty backlog.
    pub const FIRST: Self = Self(1);

    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::InvalidTaskId`] when the value is zero.
    pub const fn new(value: u64) -> Result<Self, BacklogDomainError> {
        if value == 0 {
            return Err(BacklogDomainError::InvalidTaskId(value));
        }
        Ok(Self(value))
    }

    /// Returns the identifier following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for TaskId {
    type Error = BacklogDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskId> for u64 {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

impl FromStr for TaskId {
    type Err = BacklogDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = value
            .trim()
            .parse::<u64>()
            .map_err(|_| BacklogDomainError::MalformedTaskId(value.to_owned()))?;
        Self::new(parsed)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of an option within its owning task, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct OptionId(u32);

impl OptionId {
    /// Creates a validated option identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::InvalidOptionId`] when the value is zero.
    pub const fn new(value: u32) -> Result<Self, BacklogDomainError> {
        if value == 0 {
            return Err(BacklogDomainError::InvalidOptionId(value));
        }
        Ok(Self(value))
    }

    /// Returns the identifier for the option at `index` (zero-based).
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let position = u32::try_from(index).unwrap_or(u32::MAX - 1);
        Self(position.saturating_add(1))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for OptionId {
    type Error = BacklogDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OptionId> for u32 {
    fn from(value: OptionId) -> Self {
        value.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category selecting which backlog file an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogKind {
    /// Specification backlog (`specs_backlog.md`).
    Specs,
    /// Documentation backlog (`docs_backlog.md`).
    Docs,
}

impl BacklogKind {
    /// Every supported backlog kind.
    pub const ALL: [Self; 2] = [Self::Specs, Self::Docs];

    /// Returns the canonical label used in file names and commands.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Specs => "specs",
            Self::Docs => "docs",
        }
    }

    /// Returns the backlog file name for this kind, relative to the root.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}_backlog.md", self.as_str())
    }
}

impl TryFrom<&str> for BacklogKind {
    type Error = BacklogDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "specs" => Ok(Self::Specs),
            "docs" => Ok(Self::Docs),
            _ => Err(BacklogDomainError::InvalidKind(value.to_owned())),
        }
    }
}

impl FromStr for BacklogKind {
    type Err = BacklogDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for BacklogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
