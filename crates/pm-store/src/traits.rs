use std::sync::Arc;

use crate::error::StoreResult;

/// A flat map of string keys to string values.
///
/// All implementations must satisfy these invariants:
/// - `set_item` replaces the whole value for a key; there are no partial
///   writes and no merging.
/// - A failed write leaves the previous value in place.
/// - Reads observe every write that completed before them.
/// - The store never interprets values.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete `key`. Returns `true` if it existed.
    fn remove_item(&self, key: &str) -> StoreResult<bool>;

    /// All keys, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Check whether `key` exists.
    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get_item(key)?.is_some())
    }

    /// All keys starting with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StoreResult<bool> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }

    fn contains_key(&self, key: &str) -> StoreResult<bool> {
        (**self).contains_key(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }
}
