//! Local-store persistence for the Projects Manager.
//!
//! Every operation loads the whole collection for its key, changes it in
//! memory and writes the whole collection back. There is no delta, no merge
//! and no locking: two writers interleaving on the same key lose data (the
//! last write wins). That is a property of the flat key-value backend, not
//! something this layer tries to paper over.
//!
//! # Modules
//!
//! - [`projects`] -- [`LocalProjectStore`], the project and image collection
//! - [`annotations`] -- [`AnnotationStore`], per-image annotation records
//! - [`keys`] -- the store keys both use
//!
//! # Policies
//!
//! - A malformed persisted payload reads as an empty collection (logged at
//!   `warn`), never as an error and never as a partial result.
//! - Adding to a missing project fails with [`LocalError::ProjectNotFound`];
//!   removals are idempotent and silently skip missing parents.
//! - Deleting a project does not delete annotations of its images.

pub mod annotations;
pub mod error;
pub mod keys;
pub mod projects;

pub use annotations::AnnotationStore;
pub use error::{LocalError, LocalResult};
pub use keys::{annotations_key, ANNOTATIONS_KEY_PREFIX, PROJECTS_KEY};
pub use projects::LocalProjectStore;
