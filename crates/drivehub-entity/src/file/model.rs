//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_core::types::{EntityId, UserId};

use crate::lifecycle::Lifecycle;

/// A file stored in DriveHub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Unique identifier.
    pub id: EntityId,
    /// The file owner.
    pub owner_id: UserId,
    /// The file name (including extension).
    pub name: String,
    /// File size in bytes, never negative.
    pub size_bytes: i64,
    /// MIME type of the file, if known.
    pub mime_type: Option<String>,
    /// The folder containing this file (None = root).
    pub parent_id: Option<EntityId>,
    /// Key of the content inside the upload transport.
    pub storage_key: String,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file record was last mutated.
    pub modified_at: DateTime<Utc>,
    /// When the file was moved to the trash.
    pub trashed_at: Option<DateTime<Utc>>,
    /// Public share token. Only ever set while the file is active.
    pub share_token: Option<String>,
}

impl File {
    /// Check if the file is in the trash.
    pub fn is_trashed(&self) -> bool {
        self.trashed_at.is_some()
    }

    /// Check if the file currently has a share token.
    pub fn is_shared(&self) -> bool {
        self.share_token.is_some()
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_trashed_at(self.trashed_at)
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The uploading user, who becomes the owner.
    pub owner_id: UserId,
    /// The file name.
    pub name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: Option<String>,
    /// The folder to place the file in (None for root).
    pub parent_id: Option<EntityId>,
    /// Key of the already-transferred content.
    pub storage_key: String,
}
