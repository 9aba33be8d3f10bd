use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{FragmentId, OwnerId};

/// Fragment metadata as seen outside the service and as persisted in a
/// metadata store. Never carries the fragment's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentRecord {
    /// Unique fragment identifier.
    pub id: FragmentId,
    /// Owner the fragment belongs to.
    pub owner_id: OwnerId,
    /// When the fragment was created.
    pub created: DateTime<Utc>,
    /// When the metadata was last persisted.
    pub updated: DateTime<Utc>,
    /// Declared content type, parameters included (e.g. `text/plain; charset=utf-8`).
    #[serde(rename = "type")]
    pub content_type: String,
    /// Byte length of the current data.
    pub size: u64,
}
