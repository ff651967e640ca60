//! Binary-to-text encoding for the Projects Manager.
//!
//! The key-value store only holds text, so uploaded files are kept inline as
//! RFC 2397 data URLs: a MIME header followed by the base64 payload. The
//! original bytes are exactly recoverable with [`decode`].
//!
//! - [`DataUrl`] -- parsed form, `Display` renders the text form
//! - [`encode_bytes`] / [`decode`] -- direct conversions
//! - [`read_file`] / [`encode_file`] -- async reads of an [`pm_types::UploadFile`]

pub mod data_url;
pub mod error;
pub mod reader;

pub use data_url::{decode, encode_bytes, DataUrl, DEFAULT_MIME_TYPE};
pub use error::{CodecError, CodecResult};
pub use reader::{encode_file, read_file, EncodedFile};
