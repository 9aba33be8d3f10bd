use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use fragments_core::{FragmentId, FragmentRecord, MediaType, OwnerId, is_supported_type};
use fragments_store::{StoreError, StoreKey};

use crate::error::FragmentError;
use crate::fragments::Fragments;

/// A fragment's metadata plus the operations that move it through its
/// lifecycle.
///
/// The entity holds no store handles of its own; every persisting call takes
/// the [`Fragments`] it should go through. The declared type never changes
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    record: FragmentRecord,
    media: MediaType,
}

impl Fragment {
    /// Create a new, not yet persisted fragment with a fresh id.
    ///
    /// Fails with [`FragmentError::UnsupportedType`] if the base type of
    /// `content_type` is not supported.
    pub fn new(
        owner: impl Into<OwnerId>,
        content_type: impl Into<String>,
        size: u64,
    ) -> Result<Self, FragmentError> {
        let content_type = content_type.into();
        let media = MediaType::parse(&content_type);
        if !media.is_supported() {
            return Err(FragmentError::UnsupportedType(content_type));
        }

        let now = Utc::now();
        Ok(Self {
            record: FragmentRecord {
                id: FragmentId::generate(),
                owner_id: owner.into(),
                created: now,
                updated: now,
                content_type,
                size,
            },
            media,
        })
    }

    /// Rebuild an entity from a stored record. No type validation: the
    /// supported set is only enforced at creation.
    pub(crate) fn from_record(record: FragmentRecord) -> Self {
        let media = MediaType::parse(&record.content_type);
        Self { record, media }
    }

    /// True iff the base type of `value`, parameters ignored, is supported.
    pub fn is_supported_type(value: &str) -> bool {
        is_supported_type(value)
    }

    pub fn id(&self) -> &FragmentId {
        &self.record.id
    }

    pub fn owner_id(&self) -> &OwnerId {
        &self.record.owner_id
    }

    /// Declared type, parameters included.
    pub fn content_type(&self) -> &str {
        &self.record.content_type
    }

    /// Declared type without parameters, e.g. `text/plain`.
    pub fn mime_type(&self) -> &str {
        self.media.base()
    }

    pub fn is_text(&self) -> bool {
        self.media.is_text()
    }

    pub fn size(&self) -> u64 {
        self.record.size
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.record.created
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.record.updated
    }

    /// Content types this fragment can be served as.
    pub fn formats(&self) -> Vec<&'static str> {
        fragments_convert::formats_for(&self.record.content_type)
    }

    /// The external metadata representation.
    pub fn record(&self) -> &FragmentRecord {
        &self.record
    }

    pub(crate) fn key(&self) -> Result<StoreKey, FragmentError> {
        Ok(StoreKey::new(
            self.record.owner_id.as_str(),
            self.record.id.as_str(),
        )?)
    }

    /// Persist the metadata (upsert), refreshing `updated` first.
    ///
    /// `updated` never moves backwards, even if the clock does.
    pub async fn save(&mut self, fragments: &Fragments) -> Result<(), FragmentError> {
        let key = self.key()?;
        self.record.updated = Utc::now().max(self.record.updated);
        fragments.metadata().put(&key, &self.record).await?;
        debug!(owner = %self.record.owner_id, id = %self.record.id, "fragment metadata saved");
        Ok(())
    }

    /// Replace the fragment's data, recompute `size`, and persist the
    /// metadata so the new size and timestamp are durable.
    ///
    /// If the metadata cannot be saved after the data was written, the
    /// previous bytes are put back (or removed, if there were none) so the
    /// stored size keeps describing the stored data. The restore is best
    /// effort and its own failure is only logged.
    pub async fn set_data(&mut self, fragments: &Fragments, data: Bytes) -> Result<(), FragmentError> {
        let key = self.key()?;
        let previous = match fragments.data().read(&key).await {
            Ok(bytes) => Some(bytes),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };

        let size = data.len() as u64;
        fragments.data().write(&key, data).await?;

        let (prev_size, prev_updated) = (self.record.size, self.record.updated);
        self.record.size = size;
        if let Err(e) = self.save(fragments).await {
            self.record.size = prev_size;
            self.record.updated = prev_updated;
            error!(owner = %self.record.owner_id, id = %self.record.id, error = %e, "metadata save failed, restoring data");
            let restored = match previous {
                Some(bytes) => fragments.data().write(&key, bytes).await,
                None => fragments.data().delete(&key).await,
            };
            if let Err(restore) = restored {
                error!(owner = %self.record.owner_id, id = %self.record.id, error = %restore, "data restore failed");
            }
            return Err(e);
        }

        debug!(owner = %self.record.owner_id, id = %self.record.id, size, "fragment data written");
        Ok(())
    }

    /// Read the fragment's data. Fails with [`FragmentError::NotFound`] if
    /// nothing has been written yet.
    pub async fn get_data(&self, fragments: &Fragments) -> Result<Bytes, FragmentError> {
        let key = self.key()?;
        Ok(fragments.data().read(&key).await?)
    }
}
