//! Proposed remedies attached to a task.

use super::{BacklogDomainError, HISTORY_MARKER, OptionId, text};
use serde::{Deserialize, Serialize};

/// A candidate remedy attached to a task, pending approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOption {
    id: OptionId,
    title: String,
    details: String,
    status: String,
}

impl TaskOption {
    /// Creates an option with normalised title and details.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyOptionTitle`] when the title is
    /// blank, or [`BacklogDomainError::ReservedDetailLine`] when a detail
    /// line reads `# History`.
    pub fn new(
        id: OptionId,
        title: &str,
        details: &str,
        status: &str,
    ) -> Result<Self, BacklogDomainError> {
        let normalized_title = text::single_line(title);
        if normalized_title.is_empty() {
            return Err(BacklogDomainError::EmptyOptionTitle);
        }
        let normalized_details = text::multi_line(details);
        if let Some(line) = normalized_details
            .lines()
            .find(|line| *line == HISTORY_MARKER)
        {
            return Err(BacklogDomainError::ReservedDetailLine(line.to_owned()));
        }
        Ok(Self {
            id,
            title: normalized_title,
            details: normalized_details,
            status: status.trim().to_owned(),
        })
    }

    /// Returns the option identifier.
    #[must_use]
    pub const fn id(&self) -> OptionId {
        self.id
    }

    /// Returns the single-line title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the details, possibly spanning several lines.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns the free-form status annotation.
    ///
    /// The state machine never interprets this value and the document grammar
    /// does not persist it.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the text used as a resolution when this option is approved.
    #[must_use]
    pub fn as_resolution(&self) -> String {
        if self.details.is_empty() {
            return self.title.clone();
        }
        format!("{}: {}", self.title, text::single_line(&self.details))
    }
}

/// Caller-supplied proposal, normalised into a [`TaskOption`] at the boundary.
///
/// Deserialises from either a bare JSON string or an object with `title`,
/// `details` and `status` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Proposal {
    /// A proposal given as plain text, used verbatim as the option title.
    Text(String),
    /// A proposal with separate title, details and status.
    Structured {
        /// Single-line option title.
        title: String,
        /// Optional multi-line details.
        #[serde(default)]
        details: String,
        /// Optional free-form status annotation.
        #[serde(default)]
        status: String,
    },
}

impl Proposal {
    /// Creates a structured proposal with a title and details.
    #[must_use]
    pub fn structured(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Structured {
            title: title.into(),
            details: details.into(),
            status: String::new(),
        }
    }

    /// Converts the proposal into an option carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyOptionTitle`] when the proposal has
    /// no title text.
    pub fn into_option(self, id: OptionId) -> Result<TaskOption, BacklogDomainError> {
        match self {
            Self::Text(title) => TaskOption::new(id, &title, "", ""),
            Self::Structured {
                title,
                details,
                status,
            } => TaskOption::new(id, &title, &details, &status),
        }
    }
}

impl From<&str> for Proposal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Proposal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
