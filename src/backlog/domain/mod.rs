//! Domain model for the backlog ledger.
//!
//! Tasks, their proposed options and the archived history are plain values
//! with no infrastructure dependencies. Lifecycle status is derived from the
//! task fields rather than stored.

mod approval;
mod backlog;
mod change_queue;
mod error;
mod history;
mod ids;
mod option;
mod task;
pub mod text;
mod update;

pub use approval::{Approval, ApprovalChoice};
pub use backlog::{Backlog, TaskChange};
pub use change_queue::{ChangeQueue, QueuedChange};
pub use error::{BacklogDomainError, ParseTaskStatusError};
pub use history::{DEFAULT_DONE_RESOLUTION, HISTORY_MARKER, HistoryEntry};
pub use ids::{BacklogKind, OptionId, TaskId};
pub use option::{Proposal, TaskOption};
pub use task::{Task, TaskStatus};
pub use update::TaskUpdate;
