//! Application configuration.
//!
//! Loaded from TOML, every section optional:
//!
//! ```toml
//! [store]
//! path = "/var/lib/pm/local-storage.json"
//! quota_bytes = 5242880
//!
//! [api]
//! base_url = "http://localhost:8000"
//!
//! [log]
//! filter = "info,pm_local=debug"
//! ```
//!
//! Environment variables override file values; see
//! [`AppConfig::apply_env_overrides`].

use std::path::{Path, PathBuf};

use pm_client::{ClientConfig, API_BASE_ENV};
use pm_store::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};
use crate::telemetry::DEFAULT_LOG_FILTER;

/// Path of the file-backed store. Unset means in-memory.
pub const STORE_PATH_ENV: &str = "PM_STORE_PATH";
/// Store quota in bytes.
pub const STORE_QUOTA_ENV: &str = "PM_STORE_QUOTA";
/// Log filter.
pub const LOG_ENV: &str = "PM_LOG";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub api: ClientConfig,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// JSON file backing the store. `None` keeps everything in memory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub quota_bytes: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> SdkResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> SdkResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style variables:
    /// `PM_STORE_PATH`, `PM_STORE_QUOTA`, `PM_API_BASE` and `PM_LOG`.
    /// Blank values are ignored.
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> SdkResult<()> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(STORE_PATH_ENV) {
            self.store.path = Some(PathBuf::from(path.trim()));
        }
        if let Some(quota) = get(STORE_QUOTA_ENV) {
            let quota = quota.trim().parse::<u64>().map_err(|e| {
                SdkError::Config(format!("{STORE_QUOTA_ENV}={quota:?} is not a byte count: {e}"))
            })?;
            self.store.quota_bytes = Some(quota);
        }
        if let Some(url) = get(API_BASE_ENV) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(filter) = get(LOG_ENV) {
            self.log.filter = filter;
        }
        Ok(())
    }

    /// Backend options derived from the `[store]` section.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            quota_bytes: self.store.quota_bytes,
        }
    }
}
