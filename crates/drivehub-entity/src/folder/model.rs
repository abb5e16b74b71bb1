//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_core::types::{EntityId, UserId};

use crate::lifecycle::Lifecycle;

/// A folder in the hierarchy.
///
/// Folders do not own their children: files and sub-folders point at their
/// parent through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier.
    pub id: EntityId,
    /// The folder owner.
    pub owner_id: UserId,
    /// Folder name, never empty.
    pub name: String,
    /// Parent folder ID (None for root-level folders).
    pub parent_id: Option<EntityId>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was moved to the trash.
    pub trashed_at: Option<DateTime<Utc>>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if the folder is in the trash.
    pub fn is_trashed(&self) -> bool {
        self.trashed_at.is_some()
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_trashed_at(self.trashed_at)
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The folder owner.
    pub owner_id: UserId,
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<EntityId>,
}
