//! Core store type and builder.

use crate::document::{Document, Post, User};
use crate::error::{Error, Result};
use crate::persist::{atomic_write, ensure_file, load, remove};
use crate::repo::Repository;
use crate::serializer::{JsonSerializer, Serializer};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Flat-file JSON store for posts and users.
///
/// Nothing is cached between calls: every operation reloads the whole
/// [`Document`] from disk and writes operations rewrite the whole file. One
/// lock guards the file, and write operations hold it across the entire
/// load-mutate-persist sequence so concurrent creates can't hand out the same
/// id.
///
/// Construct one at startup and share it (usually behind an `Arc`) with
/// everything that needs it.
///
/// **Single-process only.** Two processes pointed at the same file will lose
/// each other's writes.
pub struct Store {
    path: PathBuf,
    serializer: JsonSerializer,
    lock: Mutex<()>,
}

impl Store {
    /// Open (or create) a store at `path` with compact JSON.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start configuring a new store. Call [`.build()`](StoreBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> StoreBuilder {
        StoreBuilder::new(path)
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ---- repositories ----

    /// Create/list/get for posts.
    pub fn posts(&self) -> Repository<'_, Post> {
        Repository::new(self)
    }

    /// Create/list/get for users.
    pub fn users(&self) -> Repository<'_, User> {
        Repository::new(self)
    }

    // ---- primitives ----

    /// Create the backing file if it's missing. Idempotent.
    pub fn ensure(&self) -> Result<()> {
        let _guard = self.lock.lock();
        ensure_file(&self.path)
    }

    /// Read the whole document from disk.
    pub fn load(&self) -> Result<Document> {
        let _guard = self.lock.lock();
        self.load_locked()
    }

    /// Overwrite the file with `doc`.
    pub fn persist(&self, doc: &Document) -> Result<()> {
        let _guard = self.lock.lock();
        self.persist_locked(doc)
    }

    /// Run `f` against a freshly loaded document with the lock held.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Document) -> Result<T>,
    {
        let _guard = self.lock.lock();
        let doc = self.load_locked()?;
        f(&doc)
    }

    /// Load, let `f` mutate, persist. The lock is held for the whole
    /// sequence. Nothing is written if `f` fails.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Document) -> Result<T>,
    {
        let _guard = self.lock.lock();
        let mut doc = self.load_locked()?;
        let out = f(&mut doc)?;
        self.persist_locked(&doc)?;
        Ok(out)
    }

    /// Delete the backing file. The next operation starts from an empty
    /// document.
    pub fn reset(&self) -> Result<()> {
        let _guard = self.lock.lock();
        if remove(&self.path)? {
            info!(path = %self.path.display(), "database removed");
        }
        Ok(())
    }

    // ---- internal ----

    fn load_locked(&self) -> Result<Document> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "database missing, recreating");
            ensure_file(&self.path)?;
        }
        match load(&self.path, &self.serializer) {
            Ok(doc) => {
                debug!(posts = doc.posts.len(), users = doc.users.len(), "document loaded");
                Ok(doc)
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to load document");
                Err(err)
            }
        }
    }

    fn persist_locked(&self, doc: &Document) -> Result<()> {
        let bytes = self.serializer.serialize(doc)?;
        atomic_write(&self.path, &bytes)?;
        debug!(bytes = bytes.len(), "document persisted");
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("pretty", &self.serializer.is_pretty())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`Store`].
///
/// ```rust,no_run
/// use chirpy_store::Store;
///
/// let store = Store::builder("database.json").pretty(true).build().unwrap();
/// ```
#[derive(Debug)]
pub struct StoreBuilder {
    path: PathBuf,
    pretty: bool,
}

impl StoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: false,
        }
    }

    /// Write human-readable JSON with indentation (default: compact).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Create the backing file if needed and return the store. Failing to
    /// create the file is an [`Error::Startup`].
    pub fn build(self) -> Result<Store> {
        ensure_file(&self.path)
            .map_err(|e| Error::Startup(format!("{}: {e}", self.path.display())))?;
        info!(path = %self.path.display(), "store opened");

        let serializer = if self.pretty {
            JsonSerializer::pretty()
        } else {
            JsonSerializer::new()
        };

        Ok(Store {
            path: self.path,
            serializer,
            lock: Mutex::new(()),
        })
    }
}
