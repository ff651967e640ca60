//! Flat string key-value storage for the Projects Manager.
//!
//! The front-end this workspace serves kept its state in the browser's local
//! storage: one process-wide map of string keys to string values, with no
//! transactions. This crate puts that resource behind the [`KeyValueStore`]
//! trait so callers never touch the raw map, and so tests can swap in an
//! in-memory backend.
//!
//! # Storage Backends
//!
//! - [`InMemoryKeyValueStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileKeyValueStore`] -- a JSON object file, rewritten atomically on
//!   every mutation
//!
//! # Design Rules
//!
//! 1. Values are opaque strings; the store never interprets them.
//! 2. Every mutation is all-or-nothing for that one key.
//! 3. There is no cross-key transaction and no compare-and-swap. Read,
//!    modify, write sequences from two writers race; the last write wins.
//! 4. An optional byte quota rejects writes that would overflow it, leaving
//!    the previous value in place.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;
