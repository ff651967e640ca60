use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Options shared by every backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Upper bound on the summed byte length of all keys and values.
    /// `None` means unbounded.
    #[serde(default)]
    pub quota_bytes: Option<u64>,
}

impl StoreConfig {
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Check that replacing `key` with `value` keeps `entries` within quota.
    pub(crate) fn check_quota(
        &self,
        entries: &BTreeMap<String, String>,
        key: &str,
        value: &str,
    ) -> StoreResult<()> {
        let Some(quota) = self.quota_bytes else {
            return Ok(());
        };
        let current = used_bytes(entries);
        let replaced = entries
            .get(key)
            .map(|old| (key.len() + old.len()) as u64)
            .unwrap_or(0);
        let required = current - replaced + (key.len() + value.len()) as u64;
        if required > quota {
            return Err(StoreError::QuotaExceeded {
                key: key.to_string(),
                required,
                quota,
            });
        }
        Ok(())
    }
}

/// Summed byte length of every key and value.
pub(crate) fn used_bytes(entries: &BTreeMap<String, String>) -> u64 {
    entries
        .iter()
        .map(|(k, v)| (k.len() + v.len()) as u64)
        .sum()
}
