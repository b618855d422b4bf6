//! Storage port for backlog documents.

use crate::backlog::domain::{Backlog, BacklogKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backlog store operations.
pub type BacklogStoreResult<T> = Result<T, BacklogStoreError>;

/// File metadata captured when a backlog is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BacklogMeta {
    /// Last modification time of the backing document.
    pub modified: DateTime<Utc>,
    /// Size of the backing document in bytes.
    pub size: u64,
}

/// A parsed backlog together with the metadata of its document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedBacklog {
    /// The parsed backlog.
    pub backlog: Backlog,
    /// Metadata of the document the backlog was read from.
    pub meta: BacklogMeta,
}

/// Persistence contract for backlog documents, one per [`BacklogKind`].
///
/// Implementations read and write whole documents; callers perform a full
/// load, mutate and save cycle for every change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BacklogStore: Send + Sync {
    /// Returns a key identifying the document for `kind`.
    ///
    /// Two stores that reach the same document return the same key, so
    /// services can serialise work on it across store instances.
    fn document_key(&self, kind: BacklogKind) -> String;

    /// Loads and parses the backlog for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogStoreError::NotFound`] when the document does not
    /// exist or [`BacklogStoreError::Io`] when it cannot be read.
    async fn load(&self, kind: BacklogKind) -> BacklogStoreResult<LoadedBacklog>;

    /// Renders and replaces the backlog document for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogStoreError::Io`] when the document cannot be written.
    async fn save(&self, kind: BacklogKind, backlog: &Backlog) -> BacklogStoreResult<()>;

    /// Creates an empty backlog document for `kind` when none exists.
    ///
    /// Returns `true` when a document was created and `false` when one was
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogStoreError::Io`] when the document cannot be created.
    async fn create(&self, kind: BacklogKind) -> BacklogStoreResult<bool>;
}

/// Errors returned by backlog store implementations.
#[derive(Debug, Clone, Error)]
pub enum BacklogStoreError {
    /// No backlog document exists for the kind.
    #[error("backlog not found: {path}")]
    NotFound {
        /// Location of the missing document.
        path: String,
    },

    /// Reading or writing the document failed.
    #[error("failed to {action} backlog {path}: {source}")]
    Io {
        /// The operation that failed, such as `read` or `write`.
        action: &'static str,
        /// Location of the document.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Store infrastructure failure unrelated to a specific document.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BacklogStoreError {
    /// Wraps an I/O failure for the document at `path`.
    pub fn io(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Wraps an infrastructure error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
