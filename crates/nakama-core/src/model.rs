//! Typed views over stored documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, status::Rank, store::Document};

/// A crew member profile as stored in the `nakama` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub username:       String,
  pub rank:           Rank,
  /// $BELLY balance.
  pub belly:          u64,
  pub nakamas:        u64,
  pub last_active_ts: Option<DateTime<Utc>>,
}

impl Profile {
  /// Decode a stored document; unknown keys such as `_id` are ignored.
  pub fn from_document(document: Document) -> Result<Self> {
    serde_json::from_value(document.into()).map_err(crate::Error::store)
  }
}
