//! HTTP client for the Projects Manager REST API.
//!
//! An alternative to the local store for deployments that run the API
//! server. The client only relays: every call maps to one request, and the
//! server's answer (or its failure) is handed back unchanged.
//!
//! # Response handling
//!
//! - A non-2xx status fails with [`ClientError::Http`], carrying the
//!   response body text, or `HTTP <status>` when the body is empty.
//! - `204 No Content` resolves to an empty result.
//! - Anything else is decoded as JSON.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{ApiClient, UPLOAD_FIELD};
pub use config::{ClientConfig, API_BASE_ENV, DEFAULT_API_BASE};
pub use error::{ClientError, ClientResult};
pub use types::{HealthStatus, RemoteAnnotation, RemoteImage, RemoteProject};
