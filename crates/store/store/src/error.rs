use thiserror::Error;

/// Errors from metadata and byte store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A key part was empty.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("key not found: {0}")]
    NotFound(String),

    /// The backing store could not be reached or rejected the request.
    #[error("io failure: {0}")]
    Io(String),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}
