//! High-level SDK for the Projects Manager.
//!
//! Wires the lower crates together for an embedding application: load an
//! [`AppConfig`], install logging with [`init_tracing`], then open a
//! [`Workspace`] to reach the local project store, the annotation store and
//! the remote API client.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workspace;

pub use config::{AppConfig, LogSettings, StoreSettings};
pub use error::{SdkError, SdkResult};
pub use telemetry::{init_tracing, DEFAULT_LOG_FILTER};
pub use workspace::{SharedStore, Workspace};

// Re-export key types
pub use pm_client::{ApiClient, ClientConfig, RemoteAnnotation, RemoteImage, RemoteProject};
pub use pm_codec::{decode as decode_data_url, DataUrl};
pub use pm_local::{AnnotationStore, LocalProjectStore};
pub use pm_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, StoreConfig};
pub use pm_types::{BoxAnnotation, Image, Project, UploadFile};
