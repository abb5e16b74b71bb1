//! Terminal aggregate of an upload batch.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use drivehub_core::types::{BatchId, EntityId};

use super::item::{UploadItem, UploadStatus};

/// Outcome of one item, with enough context to retry it alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    /// Position in submission order.
    pub index: usize,
    /// Target file name.
    pub name: String,
    /// Target folder.
    pub folder_id: Option<EntityId>,
    /// Declared MIME type.
    pub mime_type: Option<String>,
    /// Original content handle.
    #[serde(skip)]
    pub content: Bytes,
    /// Terminal state.
    pub status: UploadStatus,
}

impl ItemReport {
    /// Rebuild the original item, e.g. to retry a failure.
    pub fn to_item(&self) -> UploadItem {
        UploadItem {
            content: self.content.clone(),
            name: self.name.clone(),
            folder_id: self.folder_id,
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Per-item outcomes of a batch in submission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// The batch.
    pub batch_id: BatchId,
    /// One report per submitted item.
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    /// Number of items that produced a file.
    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, UploadStatus::Succeeded { .. }))
    }

    /// Number of failed items.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, UploadStatus::Failed { .. }))
    }

    /// Number of items skipped by cancellation.
    pub fn cancelled(&self) -> usize {
        self.count(|s| matches!(s, UploadStatus::Cancelled))
    }

    /// Files created by this batch, in submission order.
    pub fn file_ids(&self) -> Vec<EntityId> {
        self.items
            .iter()
            .filter_map(|i| match i.status {
                UploadStatus::Succeeded { file_id } => Some(file_id),
                _ => None,
            })
            .collect()
    }

    /// Items worth resubmitting.
    pub fn failed_items(&self) -> impl Iterator<Item = &ItemReport> {
        self.items
            .iter()
            .filter(|i| matches!(i.status, UploadStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&UploadStatus) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.status)).count()
    }
}
