use std::path::PathBuf;

use thiserror::Error;

/// Errors from encoding or decoding data URLs.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file behind an upload could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a data URL: missing `data:` scheme")]
    MissingScheme,

    #[error("malformed data URL: missing `,` before the payload")]
    MissingPayload,

    /// Only base64 payloads are produced or accepted.
    #[error("data URL is not base64-encoded (header `{0}`)")]
    NotBase64(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
