use thiserror::Error;

/// Errors from local-store operations.
#[derive(Debug, Error)]
pub enum LocalError {
    /// Caller input failed validation (e.g. a blank project name).
    #[error("validation error: {0}")]
    Validation(#[from] pm_types::TypeError),

    /// The operation targets a project that does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    /// An upload could not be encoded; the batch was abandoned.
    #[error("failed to encode {filename}: {source}")]
    Encode {
        filename: String,
        #[source]
        source: pm_codec::CodecError,
    },

    /// The collection could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store error: {0}")]
    Store(#[from] pm_store::StoreError),
}

/// Result alias for local-store operations.
pub type LocalResult<T> = Result<T, LocalError>;
