use async_trait::async_trait;

use fragments_core::FragmentRecord;

use crate::error::StoreError;
use crate::key::StoreKey;

/// Trait for persisting fragment metadata records.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// Concurrent writes to the same key are last-writer-wins.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert or replace the record for `key`.
    async fn put(&self, key: &StoreKey, record: &FragmentRecord) -> Result<(), StoreError>;

    /// Get the record for a key. Returns `None` if not found.
    async fn get(&self, key: &StoreKey) -> Result<Option<FragmentRecord>, StoreError>;

    /// Delete the record for a key. Fails with [`StoreError::NotFound`] if
    /// nothing is stored there.
    async fn delete(&self, key: &StoreKey) -> Result<(), StoreError>;

    /// List every record stored for `owner`, in the order the owner's
    /// records were first inserted.
    ///
    /// Returns `None` when the owner has no records at all.
    async fn list_by_owner(&self, owner: &str) -> Result<Option<Vec<FragmentRecord>>, StoreError>;
}
