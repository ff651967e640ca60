//! Foundation types for the Projects Manager.
//!
//! Every other `pm-*` crate depends on `pm-types`. It defines the records
//! persisted by the local store, the identifier generator and the upload
//! descriptor handed to the encoder and the remote client.
//!
//! # Key Types
//!
//! - [`Project`] -- a named collection of images, newest image first
//! - [`Image`] -- an uploaded file carried inline as a data URL
//! - [`BoxAnnotation`] -- normalised bounding-box annotation record
//! - [`UploadFile`] -- a file waiting to be encoded or uploaded
//! - [`new_id`] -- opaque identifier generation

pub mod annotation;
pub mod error;
pub mod id;
pub mod model;
pub mod name;
pub mod upload;

pub use annotation::BoxAnnotation;
pub use error::TypeError;
pub use id::{new_id, new_id_with, IdStrategy};
pub use model::{Image, Project};
pub use name::{project_name, MAX_PROJECT_NAME_LEN};
pub use upload::{FileSource, UploadFile};
