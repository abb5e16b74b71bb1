//! Queued upload items and their per-item state machine.
//!
//! ```text
//! Queued -> Uploading -> Succeeded | Failed
//! Queued -> Cancelled
//! ```

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use drivehub_core::error::{AppError, ErrorKind};
use drivehub_core::types::{BatchId, EntityId};

use super::report::BatchReport;

/// One pending upload. `content` is a cheap-to-clone handle, so a failed
/// item can be resubmitted without re-reading the source.
#[derive(Debug, Clone)]
pub struct UploadItem {
    /// Raw content.
    pub content: Bytes,
    /// Target file name.
    pub name: String,
    /// Target folder (None = root).
    pub folder_id: Option<EntityId>,
    /// Declared MIME type; inferred from the name when absent.
    pub mime_type: Option<String>,
}

impl UploadItem {
    /// Create an item targeting `folder_id` with no declared MIME type.
    pub fn new(content: impl Into<Bytes>, name: impl Into<String>, folder_id: Option<EntityId>) -> Self {
        Self {
            content: content.into(),
            name: name.into(),
            folder_id,
            mime_type: None,
        }
    }

    /// Set the declared MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Content length in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

/// State of a single item within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UploadStatus {
    /// Waiting for its turn.
    Queued,
    /// Being transferred.
    Uploading,
    /// Stored; a new active file exists.
    Succeeded {
        /// The created file.
        file_id: EntityId,
    },
    /// Terminal failure for this item only.
    Failed {
        /// Error category.
        kind: ErrorKind,
        /// Error message.
        message: String,
        /// Whether the same item may succeed if attempted again unchanged.
        retryable: bool,
    },
    /// Skipped because the batch was cancelled before its turn.
    Cancelled,
}

impl UploadStatus {
    /// Build a `Failed` status from an error. Transient errors are marked
    /// retryable.
    pub fn failed(err: &AppError) -> Self {
        Self::Failed {
            kind: err.kind,
            message: err.message.clone(),
            retryable: err.kind.is_transient(),
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded { .. } | Self::Failed { .. } | Self::Cancelled
        )
    }
}

/// Observable progress of a batch, emitted in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UploadEvent {
    /// An item changed state.
    ItemStatusChanged {
        /// The batch.
        batch_id: BatchId,
        /// Position of the item in submission order.
        index: usize,
        /// The new state.
        status: UploadStatus,
    },
    /// Every item reached a terminal state. Emitted exactly once per batch.
    BatchCompleted(BatchReport),
}
