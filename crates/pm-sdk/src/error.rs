use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(#[from] pm_store::StoreError),

    #[error("local store error: {0}")]
    Local(#[from] pm_local::LocalError),

    #[error("remote API error: {0}")]
    Client(#[from] pm_client::ClientError),
}

pub type SdkResult<T> = Result<T, SdkError>;
