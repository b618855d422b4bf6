//! Filesystem adapter implementations.

mod store;

pub use store::FileBacklogStore;
