//! Backlog command parser.

use std::collections::BTreeMap;

use super::{CommandError, params::parse_params};
use crate::backlog::domain::{Approval, BacklogKind, Proposal, TaskId, TaskStatus, TaskUpdate};

/// A parsed backlog operation with typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BacklogCommand {
    /// Create an empty backlog document if none exists.
    CreateBacklog {
        /// Target backlog.
        kind: BacklogKind,
    },
    /// Load the whole backlog with document metadata.
    LoadBacklog {
        /// Target backlog.
        kind: BacklogKind,
    },
    /// Fetch one active task.
    GetTask {
        /// Target backlog.
        kind: BacklogKind,
        /// Task to fetch.
        id: TaskId,
    },
    /// Attach one proposal to a task.
    ProposeFix {
        /// Target backlog.
        kind: BacklogKind,
        /// Task receiving the proposal.
        id: TaskId,
        /// Proposal text or structure.
        proposal: Proposal,
    },
    /// Attach every list item in the text to a task.
    AddOptionsFromText {
        /// Target backlog.
        kind: BacklogKind,
        /// Task receiving the options.
        id: TaskId,
        /// Numbered or bulleted list.
        text: String,
    },
    /// Create one task per list item in the text.
    AddTasksFromText {
        /// Target backlog.
        kind: BacklogKind,
        /// Numbered or bulleted list.
        text: String,
    },
    /// Approve a resolution for a task.
    ApproveResolution {
        /// Target backlog.
        kind: BacklogKind,
        /// Task being resolved.
        id: TaskId,
        /// Approved resolution text.
        resolution: String,
    },
    /// List resolved tasks.
    GetApprovedTasks {
        /// Target backlog.
        kind: BacklogKind,
    },
    /// List tasks that need work.
    GetNewTasks {
        /// Target backlog.
        kind: BacklogKind,
    },
    /// List tasks with the given status.
    FindTasksByStatus {
        /// Target backlog.
        kind: BacklogKind,
        /// Status to match.
        status: TaskStatus,
    },
    /// Move a task to a status.
    SetStatus {
        /// Target backlog.
        kind: BacklogKind,
        /// Task to move.
        id: TaskId,
        /// Target status.
        status: TaskStatus,
    },
    /// Merge field updates into a task.
    UpdateTask {
        /// Target backlog.
        kind: BacklogKind,
        /// Task to update.
        id: TaskId,
        /// Fields to merge.
        update: TaskUpdate,
    },
    /// Archive a task to history.
    MarkDone {
        /// Target backlog.
        kind: BacklogKind,
        /// Task to archive.
        id: TaskId,
        /// Optional resolution recorded in history.
        done_text: Option<String>,
    },
    /// Append a new task.
    AppendTask {
        /// Target backlog.
        kind: BacklogKind,
        /// Task description.
        description: String,
    },
    /// Apply a batch of approvals.
    ApplyApprovals {
        /// Target backlog.
        kind: BacklogKind,
        /// Approvals to apply.
        approvals: Vec<Approval>,
    },
}

/// Parameters of one invocation, with the operation name for messages.
struct Arguments {
    operation: String,
    params: BTreeMap<&'static str, String>,
}

impl Arguments {
    fn optional(&self, key: &'static str) -> Option<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<&str, CommandError> {
        self.optional(key)
            .ok_or_else(|| CommandError::MissingParameter {
                operation: self.operation.clone(),
                parameter: key,
            })
    }

    fn task_id(&self) -> Result<TaskId, CommandError> {
        Ok(self.required("taskId")?.parse::<TaskId>()?)
    }

    fn status(&self) -> Result<TaskStatus, CommandError> {
        TaskStatus::try_from(self.required("status")?).map_err(|err| {
            CommandError::InvalidParameter {
                parameter: "status",
                reason: err.to_string(),
            }
        })
    }

    fn json<T: serde::de::DeserializeOwned>(&self, key: &'static str) -> Result<T, CommandError> {
        serde_json::from_str(self.required(key)?).map_err(|err| CommandError::InvalidParameter {
            parameter: key,
            reason: err.to_string(),
        })
    }

    fn proposal(&self) -> Result<Proposal, CommandError> {
        let raw = self.required("proposal")?;
        if raw.starts_with('{') {
            return self.json("proposal");
        }
        Ok(Proposal::Text(raw.to_owned()))
    }
}

impl BacklogCommand {
    /// Parses `<operation> <kind> key: value ...` input.
    ///
    /// Operation names follow the skill vocabulary (`getTask`,
    /// `approveResolution`, ...). Only the keys an operation accepts start a
    /// value. `updates`, `approvals` and object-shaped `proposal` values are
    /// JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] when the operation is unknown, the kind is
    /// missing or invalid, or a required parameter is absent or malformed.
    pub fn parse(raw_input: &str) -> Result<Self, CommandError> {
        let trimmed = raw_input.trim();
        let (operation, after_operation) = split_token(trimmed);
        if operation.is_empty() {
            return Err(CommandError::EmptyInput);
        }
        let Some(keys) = accepted_keys(operation) else {
            return Err(CommandError::UnknownOperation(operation.to_owned()));
        };
        let (kind_token, param_text) = split_token(after_operation);
        if kind_token.is_empty() {
            return Err(CommandError::MissingKind(operation.to_owned()));
        }
        let kind = BacklogKind::try_from(kind_token)?;
        let args = Arguments {
            operation: operation.to_owned(),
            params: parse_params(param_text, keys),
        };
        Self::from_arguments(operation, kind, &args)
    }

    fn from_arguments(
        operation: &str,
        kind: BacklogKind,
        args: &Arguments,
    ) -> Result<Self, CommandError> {
        let command = match operation {
            "createBacklog" => Self::CreateBacklog { kind },
            "loadBacklog" => Self::LoadBacklog { kind },
            "getTask" => Self::GetTask {
                kind,
                id: args.task_id()?,
            },
            "proposeFix" => Self::ProposeFix {
                kind,
                id: args.task_id()?,
                proposal: args.proposal()?,
            },
            "addOptionsFromText" => Self::AddOptionsFromText {
                kind,
                id: args.task_id()?,
                text: args.required("optionsText")?.to_owned(),
            },
            "addTasksFromText" => Self::AddTasksFromText {
                kind,
                text: args.required("tasksText")?.to_owned(),
            },
            "approveResolution" | "approveTask" => Self::ApproveResolution {
                kind,
                id: args.task_id()?,
                resolution: args.required("resolution")?.to_owned(),
            },
            "getApprovedTasks" => Self::GetApprovedTasks { kind },
            "getNewTasks" => Self::GetNewTasks { kind },
            "findTasksByStatus" => Self::FindTasksByStatus {
                kind,
                status: args.status()?,
            },
            "setStatus" => Self::SetStatus {
                kind,
                id: args.task_id()?,
                status: args.status()?,
            },
            "updateTask" => Self::UpdateTask {
                kind,
                id: args.task_id()?,
                update: args.json("updates")?,
            },
            "markDone" => Self::MarkDone {
                kind,
                id: args.task_id()?,
                done_text: args.optional("doneText").map(str::to_owned),
            },
            "appendTask" | "addTask" => Self::AppendTask {
                kind,
                description: args
                    .optional("description")
                    .map_or_else(|| args.required("initialContent"), Ok)?
                    .to_owned(),
            },
            "applyApprovals" => Self::ApplyApprovals {
                kind,
                approvals: args.json("approvals")?,
            },
            other => return Err(CommandError::UnknownOperation(other.to_owned())),
        };
        Ok(command)
    }

    /// Returns the backlog kind the command targets.
    #[must_use]
    pub const fn kind(&self) -> BacklogKind {
        match self {
            Self::CreateBacklog { kind }
            | Self::LoadBacklog { kind }
            | Self::GetTask { kind, .. }
            | Self::ProposeFix { kind, .. }
            | Self::AddOptionsFromText { kind, .. }
            | Self::AddTasksFromText { kind, .. }
            | Self::ApproveResolution { kind, .. }
            | Self::GetApprovedTasks { kind }
            | Self::GetNewTasks { kind }
            | Self::FindTasksByStatus { kind, .. }
            | Self::SetStatus { kind, .. }
            | Self::UpdateTask { kind, .. }
            | Self::MarkDone { kind, .. }
            | Self::AppendTask { kind, .. }
            | Self::ApplyApprovals { kind, .. } => *kind,
        }
    }
}

/// Parameter keys each operation accepts, or `None` for an unknown operation.
fn accepted_keys(operation: &str) -> Option<&'static [&'static str]> {
    let keys: &'static [&'static str] = match operation {
        "createBacklog" | "loadBacklog" | "getApprovedTasks" | "getNewTasks" => &[],
        "getTask" => &["taskId"],
        "proposeFix" => &["taskId", "proposal"],
        "addOptionsFromText" => &["taskId", "optionsText"],
        "addTasksFromText" => &["tasksText"],
        "approveResolution" | "approveTask" => &["taskId", "resolution"],
        "findTasksByStatus" => &["status"],
        "setStatus" => &["taskId", "status"],
        "updateTask" => &["taskId", "updates"],
        "markDone" => &["taskId", "doneText"],
        "appendTask" | "addTask" => &["description", "initialContent"],
        "applyApprovals" => &["approvals"],
        _ => return None,
    };
    Some(keys)
}

/// Splits off the first whitespace-delimited token.
fn split_token(text: &str) -> (&str, &str) {
    let trimmed = text.trim_start();
    trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""))
}
