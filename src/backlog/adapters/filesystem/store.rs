//! Backlog documents stored as markdown files in a capability-scoped root.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::OpenOptions;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backlog::{
    domain::{Backlog, BacklogKind},
    grammar,
    ports::{BacklogMeta, BacklogStore, BacklogStoreError, BacklogStoreResult, LoadedBacklog},
};

/// Backlog store reading `<kind>_backlog.md` files below a root directory.
///
/// All file access goes through a [`Dir`] handle opened once for the root,
/// so the store cannot reach outside it. Saves write a sibling temporary
/// file and rename it over the document.
#[derive(Debug, Clone)]
pub struct FileBacklogStore {
    root: Utf8PathBuf,
    canonical_root: Utf8PathBuf,
    dir: Arc<Dir>,
}

/// Distinguishes staging files written concurrently by this process.
static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

impl FileBacklogStore {
    /// Opens a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogStoreError::Io`] when the directory cannot be opened.
    pub fn open(root: impl Into<Utf8PathBuf>) -> BacklogStoreResult<Self> {
        let root_path = root.into();
        let dir = Dir::open_ambient_dir(&root_path, ambient_authority())
            .map_err(|err| BacklogStoreError::io("open", root_path.as_str(), err))?;
        let canonical_root = root_path
            .canonicalize_utf8()
            .map_err(|err| BacklogStoreError::io("open", root_path.as_str(), err))?;
        Ok(Self {
            root: root_path,
            canonical_root,
            dir: Arc::new(dir),
        })
    }

    /// Returns the root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the location of the document for `kind`, for messages.
    #[must_use]
    pub fn document_path(&self, kind: BacklogKind) -> Utf8PathBuf {
        self.root.join(kind.file_name())
    }
}

/// Runs a blocking filesystem operation off the async executor.
async fn run_blocking<F, T>(operation: F) -> BacklogStoreResult<T>
where
    F: FnOnce() -> BacklogStoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(BacklogStoreError::persistence)?
}

fn read_document(dir: &Dir, kind: BacklogKind, path: &str) -> BacklogStoreResult<LoadedBacklog> {
    let file_name = kind.file_name();
    let text = dir.read_to_string(&file_name).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            BacklogStoreError::NotFound {
                path: path.to_owned(),
            }
        } else {
            BacklogStoreError::io("read", path, err)
        }
    })?;
    let metadata = dir
        .metadata(&file_name)
        .map_err(|err| BacklogStoreError::io("read", path, err))?;
    let modified = metadata
        .modified()
        .map_err(|err| BacklogStoreError::io("read", path, err))?;

    Ok(LoadedBacklog {
        backlog: grammar::parse(&text),
        meta: BacklogMeta {
            modified: DateTime::<Utc>::from(modified.into_std()),
            size: metadata.len(),
        },
    })
}

fn write_document(dir: &Dir, kind: BacklogKind, path: &str, text: &str) -> BacklogStoreResult<()> {
    let file_name = kind.file_name();
    let sequence = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
    let staging_name = format!(".{file_name}.{}.{sequence}.tmp", std::process::id());
    dir.write(&staging_name, text)
        .map_err(|err| BacklogStoreError::io("write", path, err))?;
    if let Err(err) = dir.rename(&staging_name, dir, &file_name) {
        dir.remove_file(&staging_name).ok();
        return Err(BacklogStoreError::io("write", path, err));
    }
    Ok(())
}

fn create_document(dir: &Dir, kind: BacklogKind, path: &str) -> BacklogStoreResult<bool> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    match dir.open_with(kind.file_name(), &options) {
        Ok(_) => Ok(true),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(err) => Err(BacklogStoreError::io("create", path, err)),
    }
}

#[async_trait]
impl BacklogStore for FileBacklogStore {
    fn document_key(&self, kind: BacklogKind) -> String {
        self.canonical_root.join(kind.file_name()).into_string()
    }

    async fn load(&self, kind: BacklogKind) -> BacklogStoreResult<LoadedBacklog> {
        let dir = Arc::clone(&self.dir);
        let path = self.document_path(kind).into_string();
        let loaded = run_blocking(move || read_document(&dir, kind, &path)).await?;
        tracing::debug!(
            %kind,
            size = loaded.meta.size,
            tasks = loaded.backlog.task_count(),
            "loaded backlog"
        );
        Ok(loaded)
    }

    async fn save(&self, kind: BacklogKind, backlog: &Backlog) -> BacklogStoreResult<()> {
        let dir = Arc::clone(&self.dir);
        let path = self.document_path(kind).into_string();
        let text = grammar::render(backlog);
        let size = text.len();
        run_blocking(move || write_document(&dir, kind, &path, &text)).await?;
        tracing::debug!(%kind, size, "saved backlog");
        Ok(())
    }

    async fn create(&self, kind: BacklogKind) -> BacklogStoreResult<bool> {
        let dir = Arc::clone(&self.dir);
        let path = self.document_path(kind).into_string();
        let created = run_blocking(move || create_document(&dir, kind, &path)).await?;
        if created {
            tracing::info!(%kind, "created backlog");
        }
        Ok(created)
    }
}
