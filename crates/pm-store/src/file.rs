//! File-backed key-value store.
//!
//! The whole map lives in one JSON object file:
//!
//! ```text
//! { "pm_projects_v1": "[...]", "pm_annotations_v1:42": "[...]" }
//! ```
//!
//! The file is read once on open and rewritten on every mutation by writing a
//! sibling temp file and renaming it over the original, so a crash mid-write
//! leaves either the old or the new map on disk, never a torn one.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::{used_bytes, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// Key-value store persisted as a single JSON object file.
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
    config: StoreConfig,
}

impl FileKeyValueStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing or empty file opens as an empty store; the file is created
    /// on the first write. A file that is not a JSON object of strings fails
    /// with [`StoreError::Corrupt`].
    pub fn open(path: impl AsRef<Path>, config: StoreConfig) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = load_entries(&path)?;
        debug!(path = %path.display(), keys = entries.len(), "opened file store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
            config,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Summed byte length of every key and value.
    pub fn used_bytes(&self) -> u64 {
        self.entries.read().map(|m| used_bytes(&m)).unwrap_or(0)
    }

    /// Re-read the backing file, discarding the cached map.
    ///
    /// Picks up writes made by another process sharing the file.
    pub fn reload(&self) -> StoreResult<()> {
        let fresh = load_entries(&self.path)?;
        let mut map = self
            .entries
            .write()
            .map_err(|_| StoreError::LockPoisoned("reload"))?;
        *map = fresh;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let bytes = serde_json::to_vec(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "persisted file store");
        Ok(())
    }
}

fn load_entries(path: &Path) -> StoreResult<BTreeMap<String, String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let map = self
            .entries
            .read()
            .map_err(|_| StoreError::LockPoisoned("get_item"))?;
        Ok(map.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|_| StoreError::LockPoisoned("set_item"))?;
        self.config.check_quota(&map, key, value)?;

        let mut next = map.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *map = next;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<bool> {
        let mut map = self
            .entries
            .write()
            .map_err(|_| StoreError::LockPoisoned("remove_item"))?;
        if !map.contains_key(key) {
            return Ok(false);
        }

        let mut next = map.clone();
        next.remove(key);
        self.persist(&next)?;
        *map = next;
        Ok(true)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let map = self
            .entries
            .read()
            .map_err(|_| StoreError::LockPoisoned("keys"))?;
        Ok(map.keys().cloned().collect())
    }
}

impl std::fmt::Debug for FileKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileKeyValueStore")
            .field("path", &self.path)
            .field("quota_bytes", &self.config.quota_bytes)
            .finish()
    }
}
