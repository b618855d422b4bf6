//! In-memory backlog store for tests.
//!
//! Documents are held as rendered text so that every save and load passes
//! through the same grammar as the filesystem adapter.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::backlog::{
    domain::{Backlog, BacklogKind},
    grammar,
    ports::{BacklogMeta, BacklogStore, BacklogStoreError, BacklogStoreResult, LoadedBacklog},
};

/// Thread-safe in-memory backlog store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBacklogStore {
    documents: Arc<RwLock<HashMap<BacklogKind, String>>>,
}

impl InMemoryBacklogStore {
    /// Creates a store with no documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with raw document text for `kind`.
    #[must_use]
    pub fn with_document(kind: BacklogKind, text: impl Into<String>) -> Self {
        let documents = HashMap::from([(kind, text.into())]);
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }

    /// Returns the stored document text for `kind`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogStoreError::Persistence`] when the lock is poisoned.
    pub fn document(&self, kind: BacklogKind) -> BacklogStoreResult<Option<String>> {
        let documents = self.documents.read().map_err(|err| {
            BacklogStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(documents.get(&kind).cloned())
    }
}

#[async_trait]
impl BacklogStore for InMemoryBacklogStore {
    fn document_key(&self, kind: BacklogKind) -> String {
        format!("memory:{:p}/{}", Arc::as_ptr(&self.documents), kind.file_name())
    }

    async fn load(&self, kind: BacklogKind) -> BacklogStoreResult<LoadedBacklog> {
        let text = self
            .document(kind)?
            .ok_or_else(|| BacklogStoreError::NotFound {
                path: kind.file_name(),
            })?;
        let size = u64::try_from(text.len()).unwrap_or(u64::MAX);
        Ok(LoadedBacklog {
            backlog: grammar::parse(&text),
            meta: BacklogMeta {
                modified: Utc::now(),
                size,
            },
        })
    }

    async fn save(&self, kind: BacklogKind, backlog: &Backlog) -> BacklogStoreResult<()> {
        let text = grammar::render(backlog);
        let mut documents = self.documents.write().map_err(|err| {
            BacklogStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        documents.insert(kind, text);
        Ok(())
    }

    async fn create(&self, kind: BacklogKind) -> BacklogStoreResult<bool> {
        let mut documents = self.documents.write().map_err(|err| {
            BacklogStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if documents.contains_key(&kind) {
            return Ok(false);
        }
        documents.insert(kind, String::new());
        Ok(true)
    }
}
