use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use fragments_store::data::ByteStore;
use fragments_store::error::StoreError;
use fragments_store::key::StoreKey;

/// In-memory [`ByteStore`] backed by a [`DashMap`].
///
/// Stands in for object storage in tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryByteStore {
    objects: DashMap<String, Bytes>,
}

impl MemoryByteStore {
    /// Create a new, empty in-memory byte store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently held.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ByteStore for MemoryByteStore {
    async fn write(&self, key: &StoreKey, data: Bytes) -> Result<(), StoreError> {
        debug!(key = %key, size = data.len(), "object stored");
        self.objects.insert(key.canonical(), data);
        Ok(())
    }

    async fn read(&self, key: &StoreKey) -> Result<Bytes, StoreError> {
        self.objects
            .get(&key.canonical())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(key.canonical()))
    }

    async fn delete(&self, key: &StoreKey) -> Result<(), StoreError> {
        match self.objects.remove(&key.canonical()) {
            Some(_) => {
                debug!(key = %key, "object deleted");
                Ok(())
            }
            None => Err(StoreError::NotFound(key.canonical())),
        }
    }
}
