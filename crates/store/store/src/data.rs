use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;
use crate::key::StoreKey;

/// Trait for persisting raw fragment data.
///
/// Writes replace the whole object; there is no append or partial update.
/// Backend failures surface as [`StoreError::Io`].
#[async_trait]
pub trait ByteStore: Send + Sync {
    /// Store `data` under `key`, replacing any previous object.
    async fn write(&self, key: &StoreKey, data: Bytes) -> Result<(), StoreError>;

    /// Read the object stored under `key`. Fails with
    /// [`StoreError::NotFound`] if none exists.
    async fn read(&self, key: &StoreKey) -> Result<Bytes, StoreError>;

    /// Delete the object stored under `key`. Fails with
    /// [`StoreError::NotFound`] if none exists.
    async fn delete(&self, key: &StoreKey) -> Result<(), StoreError>;
}
