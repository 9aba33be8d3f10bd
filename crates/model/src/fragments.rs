use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info, warn};

use fragments_core::{FragmentId, FragmentRecord, OwnerId};
use fragments_store::{ByteStore, MetadataStore, StoreError, StoreKey};

use crate::error::FragmentError;
use crate::fragment::Fragment;

/// Result of listing an owner's fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentList {
    /// Ids only.
    Ids(Vec<FragmentId>),
    /// Full metadata records.
    Expanded(Vec<FragmentRecord>),
}

impl FragmentList {
    pub fn len(&self) -> usize {
        match self {
            Self::Ids(ids) => ids.len(),
            Self::Expanded(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to the two stores fragments live in.
///
/// Metadata and data are separate records joined only by `(owner, id)`; this
/// type is the one place both are touched together. Cheap to clone.
#[derive(Clone)]
pub struct Fragments {
    metadata: Arc<dyn MetadataStore>,
    data: Arc<dyn ByteStore>,
}

impl std::fmt::Debug for Fragments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragments").finish_non_exhaustive()
    }
}

impl Fragments {
    pub fn new(metadata: Arc<dyn MetadataStore>, data: Arc<dyn ByteStore>) -> Self {
        Self { metadata, data }
    }

    pub(crate) fn metadata(&self) -> &dyn MetadataStore {
        self.metadata.as_ref()
    }

    pub(crate) fn data(&self) -> &dyn ByteStore {
        self.data.as_ref()
    }

    /// Create a fragment holding `data`.
    ///
    /// The metadata is saved first with size 0, then the data is attached.
    /// If attaching fails the metadata is removed again, so no listed record
    /// ever describes data that was never stored.
    pub async fn create(
        &self,
        owner: impl Into<OwnerId>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Result<Fragment, FragmentError> {
        let mut fragment = Fragment::new(owner, content_type, 0)?;
        fragment.save(self).await?;

        if let Err(e) = fragment.set_data(self, data).await {
            let key = fragment.key()?;
            error!(owner = %fragment.owner_id(), id = %fragment.id(), error = %e, "data write failed, removing metadata");
            if let Err(cleanup) = self.metadata.delete(&key).await {
                error!(owner = %fragment.owner_id(), id = %fragment.id(), error = %cleanup, "metadata cleanup failed");
            }
            return Err(e);
        }

        Ok(fragment)
    }

    /// Load a fragment's metadata.
    ///
    /// A fragment that exists under another owner is reported exactly like
    /// one that does not exist.
    pub async fn by_id(&self, owner: &str, id: &str) -> Result<Fragment, FragmentError> {
        let key = StoreKey::new(owner, id)?;
        match self.metadata.get(&key).await? {
            Some(record) if record.owner_id.as_str() == owner => Ok(Fragment::from_record(record)),
            _ => Err(FragmentError::NotFound(id.to_owned())),
        }
    }

    /// List an owner's fragments, as ids or full records. An owner without
    /// fragments gets an empty list.
    pub async fn by_user(&self, owner: &str, expand: bool) -> Result<FragmentList, FragmentError> {
        let records = self
            .metadata
            .list_by_owner(owner)
            .await?
            .unwrap_or_default();

        Ok(if expand {
            FragmentList::Expanded(records)
        } else {
            FragmentList::Ids(records.into_iter().map(|r| r.id).collect())
        })
    }

    /// Remove a fragment's metadata and data.
    ///
    /// Metadata goes first. A fragment that never had data written is
    /// deleted cleanly. If the data removal fails for any other reason the
    /// metadata is put back and [`FragmentError::DeleteFailed`] is returned;
    /// the restore is best effort and its own failure is only logged. A
    /// restored fragment is listed after the owner's other fragments.
    pub async fn delete(&self, owner: &str, id: &str) -> Result<(), FragmentError> {
        let key = StoreKey::new(owner, id)?;

        let Some(record) = self.metadata.get(&key).await? else {
            return Err(FragmentError::NotFound(id.to_owned()));
        };

        self.metadata.delete(&key).await.map_err(|e| match e {
            StoreError::NotFound(msg) => FragmentError::NotFound(msg),
            other => FragmentError::DeleteFailed(format!("metadata: {other}")),
        })?;

        match self.data.delete(&key).await {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => {
                warn!(owner = %owner, id = %id, "fragment had no data to delete");
            }
            Err(e) => {
                error!(owner = %owner, id = %id, error = %e, "data delete failed, restoring metadata");
                // The restore is a fresh put, so the fragment moves to the
                // end of the owner's listing.
                if let Err(restore) = self.metadata.put(&key, &record).await {
                    error!(owner = %owner, id = %id, error = %restore, "metadata restore failed");
                }
                return Err(FragmentError::DeleteFailed(format!("data: {e}")));
            }
        }

        info!(owner = %owner, id = %id, "fragment deleted");
        Ok(())
    }
}
