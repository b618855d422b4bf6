//! Runtime configuration for the backlog ledger.

use camino::{Utf8Path, Utf8PathBuf};

use crate::backlog::{adapters::filesystem::FileBacklogStore, ports::BacklogStoreResult};

/// Where backlog documents live and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    root: Utf8PathBuf,
    default_log_filter: String,
}

impl LedgerConfig {
    /// Environment variable naming the backlog root directory.
    pub const ROOT_ENV: &'static str = "BACKLOG_ROOT";

    /// Creates a configuration rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_log_filter: "warn".to_owned(),
        }
    }

    /// Sets the log filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn with_default_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_log_filter = filter.into();
        self
    }

    /// Returns the backlog root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the log filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_log_filter(&self) -> &str {
        &self.default_log_filter
    }

    /// Opens a filesystem store at the configured root.
    ///
    /// # Errors
    ///
    /// Returns [`crate::backlog::ports::BacklogStoreError::Io`] when the root
    /// directory cannot be opened.
    pub fn open_store(&self) -> BacklogStoreResult<FileBacklogStore> {
        FileBacklogStore::open(self.root.clone())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
