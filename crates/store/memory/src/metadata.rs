use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use fragments_core::FragmentRecord;
use fragments_store::error::StoreError;
use fragments_store::key::{StoreKey, validate_part};
use fragments_store::metadata::MetadataStore;

/// One owner's records, kept in first-insertion order.
#[derive(Debug, Default)]
struct OwnerEntries {
    /// `(id, serialized record)` pairs.
    entries: Vec<(String, String)>,
}

impl OwnerEntries {
    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == id)
    }
}

/// In-memory [`MetadataStore`] backed by a [`DashMap`] of owners.
///
/// Records are held as JSON strings, the same shape a networked key/value
/// store would hand back, so serialization problems surface here too. Each
/// instance is independent; share one through an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    owners: DashMap<String, OwnerEntries>,
}

impl MemoryMetadataStore {
    /// Create a new, empty in-memory metadata store.
    pub fn new() -> Self {
        Self::default()
    }

    fn decode(raw: &str) -> Result<FragmentRecord, StoreError> {
        serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn put(&self, key: &StoreKey, record: &FragmentRecord) -> Result<(), StoreError> {
        let serialized =
            serde_json::to_string(record).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut owner = self.owners.entry(key.owner().to_owned()).or_default();
        match owner.position(key.id()) {
            Some(idx) => owner.entries[idx].1 = serialized,
            None => owner.entries.push((key.id().to_owned(), serialized)),
        }

        debug!(key = %key, "metadata stored");
        Ok(())
    }

    async fn get(&self, key: &StoreKey) -> Result<Option<FragmentRecord>, StoreError> {
        let Some(owner) = self.owners.get(key.owner()) else {
            return Ok(None);
        };
        owner
            .position(key.id())
            .map(|idx| Self::decode(&owner.entries[idx].1))
            .transpose()
    }

    async fn delete(&self, key: &StoreKey) -> Result<(), StoreError> {
        let removed = self
            .owners
            .get_mut(key.owner())
            .and_then(|mut owner| {
                let idx = owner.position(key.id())?;
                Some(owner.entries.remove(idx))
            });

        if removed.is_none() {
            return Err(StoreError::NotFound(key.canonical()));
        }

        // Forget owners whose last record just went away.
        self.owners
            .remove_if(key.owner(), |_, owner| owner.entries.is_empty());

        debug!(key = %key, "metadata deleted");
        Ok(())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Option<Vec<FragmentRecord>>, StoreError> {
        validate_part("owner", owner)?;

        let Some(entries) = self.owners.get(owner) else {
            return Ok(None);
        };
        entries
            .entries
            .iter()
            .map(|(_, raw)| Self::decode(raw))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}
