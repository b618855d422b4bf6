//! Application services for backlog orchestration.

mod ledger;

pub use ledger::{BacklogService, BacklogServiceError, BacklogServiceResult};
