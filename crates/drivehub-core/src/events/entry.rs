//! File and folder lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::{BatchId, EntityId};

/// Events related to entries in the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryEvent {
    /// A folder was created.
    FolderCreated {
        /// The new folder.
        folder_id: EntityId,
        /// Its parent, `None` at root.
        parent_id: Option<EntityId>,
    },
    /// A file was created by an upload.
    FileUploaded {
        /// The new file.
        file_id: EntityId,
        /// Its parent, `None` at root.
        parent_id: Option<EntityId>,
        /// Size of the stored content.
        size_bytes: i64,
    },
    /// A file or folder was renamed or moved.
    Updated {
        /// The changed entry.
        id: EntityId,
    },
    /// An entry and its cascade were moved to the trash.
    Trashed {
        /// The entry the caller trashed.
        id: EntityId,
        /// Every entry whose state changed, the root included.
        affected: Vec<EntityId>,
    },
    /// An entry was restored (never cascades).
    Restored {
        /// The restored entry.
        id: EntityId,
    },
    /// An entry and its trashed descendants were removed permanently.
    Purged {
        /// The entry the caller purged.
        id: EntityId,
        /// Every removed entry, the root included.
        removed: Vec<EntityId>,
        /// Active descendants moved to root.
        promoted: Vec<EntityId>,
    },
    /// An upload batch reached its terminal aggregate.
    BatchCompleted {
        /// The batch.
        batch_id: BatchId,
        /// Items that produced a file.
        succeeded: usize,
        /// Items that failed.
        failed: usize,
        /// Items skipped by cancellation.
        cancelled: usize,
    },
}
