use fragments_store::StoreError;
use thiserror::Error;

/// Errors from fragment lifecycle operations.
#[derive(Debug, Error)]
pub enum FragmentError {
    /// Creation was attempted with a media type outside the supported set.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// No fragment (or no data) exists for this owner and id. A fragment
    /// owned by someone else is reported the same way.
    #[error("fragment not found: {0}")]
    NotFound(String),

    /// Metadata and data could not both be removed.
    #[error("delete failed: {0}")]
    DeleteFailed(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The backing store failed.
    #[error("store failure: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<StoreError> for FragmentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidKey(msg) => Self::InvalidKey(msg),
            StoreError::NotFound(msg) => Self::NotFound(msg),
            StoreError::Io(msg) => Self::Io(msg),
            StoreError::Serialization(msg) => Self::Serialization(msg),
        }
    }
}
