use thiserror::Error;

/// Errors from remote API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never completed (connection, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A body was expected but the server sent `204 No Content`.
    #[error("server returned no content")]
    EmptyResponse,

    /// A file selected for upload could not be read.
    #[error("failed to read upload: {0}")]
    Read(#[from] pm_codec::CodecError),
}

impl ClientError {
    /// HTTP status of a failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
