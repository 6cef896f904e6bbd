//! Key-value backends that hold the serialised document.
//!
//! A backend stores opaque strings under string keys. It knows nothing about the document
//! shape; parsing, seeding and corruption handling live in [`crate::store`].
//!
//! - [`FileBackend`] writes `<dir>/<key>.json`. Writes go to a uniquely named temporary
//!   sibling first and are renamed over the target, so a crash never leaves a half-written
//!   document behind.
//! - [`MemoryBackend`] keeps values in a map. Used by tests and by embedders that persist
//!   elsewhere.

use crate::constants::DOCUMENT_FILE_EXTENSION;
use crate::{BankError, BankResult};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Raw persisted storage for the document.
pub trait DocumentBackend: Send + Sync + fmt::Debug {
    /// Returns the stored value for `key`, or `None` if nothing has been stored.
    fn load(&self, key: &str) -> BankResult<Option<String>>;

    /// Stores `contents` under `key`, replacing any prior value.
    fn save(&self, key: &str, contents: &str) -> BankResult<()>;
}

/// File-per-key storage under a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Creates a backend rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, DOCUMENT_FILE_EXTENSION))
    }
}

impl DocumentBackend for FileBackend {
    fn load(&self, key: &str) -> BankResult<Option<String>> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(BankError::FileRead)
    }

    fn save(&self, key: &str, contents: &str) -> BankResult<()> {
        fs::create_dir_all(&self.dir).map_err(BankError::StorageDirCreation)?;

        let target = self.path_for(key);
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", key, uuid::Uuid::new_v4().simple()));

        fs::write(&tmp, contents).map_err(BankError::FileWrite)?;

        if let Err(e) = fs::rename(&tmp, &target) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::warn!(
                    "failed to remove temporary document {}: {}",
                    tmp.display(),
                    cleanup
                );
            }
            return Err(BankError::FileWrite(e));
        }

        Ok(())
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `contents` under `key`.
    pub fn with_entry(key: impl Into<String>, contents: impl Into<String>) -> Self {
        let backend = Self::default();
        backend
            .lock()
            .insert(key.into(), contents.into());
        backend
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentBackend for MemoryBackend {
    fn load(&self, key: &str) -> BankResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn save(&self, key: &str, contents: &str) -> BankResult<()> {
        self.lock().insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
