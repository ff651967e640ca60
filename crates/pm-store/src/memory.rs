use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::config::{used_bytes, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// In-memory, `BTreeMap`-based key-value store.
///
/// Intended for tests and embedding. Data is lost when the store is dropped.
pub struct InMemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, String>>,
    config: StoreConfig,
}

impl InMemoryKeyValueStore {
    /// Create a new empty, unbounded store.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a new empty store with the given options.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            config,
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summed byte length of every key and value.
    pub fn used_bytes(&self) -> u64 {
        self.entries.read().map(|m| used_bytes(&m)).unwrap_or(0)
    }

    /// Remove every key.
    pub fn clear(&self) -> StoreResult<()> {
        self.entries
            .write()
            .map_err(|_| StoreError::LockPoisoned("clear"))?
            .clear();
        Ok(())
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
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
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<bool> {
        let mut map = self
            .entries
            .write()
            .map_err(|_| StoreError::LockPoisoned("remove_item"))?;
        Ok(map.remove(key).is_some())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let map = self
            .entries
            .read()
            .map_err(|_| StoreError::LockPoisoned("keys"))?;
        Ok(map.keys().cloned().collect())
    }
}

impl std::fmt::Debug for InMemoryKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeyValueStore")
            .field("key_count", &self.len())
            .field("quota_bytes", &self.config.quota_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn set_and_get() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("a", "1").unwrap();
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.get_item("missing").unwrap().is_none());
        assert!(!store.contains_key("missing").unwrap());
    }

    #[test]
    fn set_replaces_whole_value() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("a", "first").unwrap();
        store.set_item("a", "2").unwrap();
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("a", "1").unwrap();
        assert!(store.remove_item("a").unwrap());
        assert!(!store.remove_item("a").unwrap());
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Key listing
    // -----------------------------------------------------------------------

    #[test]
    fn keys_are_sorted_and_filterable() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("b:2", "").unwrap();
        store.set_item("a", "").unwrap();
        store.set_item("b:1", "").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["a", "b:1", "b:2"]);
        assert_eq!(store.keys_with_prefix("b:").unwrap(), vec!["b:1", "b:2"]);
    }

    // -----------------------------------------------------------------------
    // Quota
    // -----------------------------------------------------------------------

    #[test]
    fn quota_rejects_and_keeps_previous_value() {
        let store = InMemoryKeyValueStore::with_config(StoreConfig::with_quota(8));
        store.set_item("k", "small").unwrap();

        let err = store.set_item("k", "far too large").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("small"));
        assert_eq!(store.used_bytes(), 6);
    }

    // -----------------------------------------------------------------------
    // Sharing
    // -----------------------------------------------------------------------

    #[test]
    fn arc_shares_state() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let other = Arc::clone(&store);
        other.set_item("shared", "yes").unwrap();
        assert_eq!(store.get_item("shared").unwrap().as_deref(), Some("yes"));
    }

    #[test]
    fn works_as_trait_object() {
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
        store.set_item("k", "v").unwrap();
        assert!(store.contains_key("k").unwrap());
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn debug_format() {
        let store = InMemoryKeyValueStore::new();
        store.set_item("x", "y").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryKeyValueStore"));
        assert!(debug.contains("key_count"));
    }
}
