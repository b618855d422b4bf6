//! Port contracts for backlog persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by backlog services.

pub mod store;

#[cfg(test)]
pub use store::MockBacklogStore;
pub use store::{BacklogMeta, BacklogStore, BacklogStoreError, BacklogStoreResult, LoadedBacklog};
