//! Share-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Events related to public share links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShareEvent {
    /// A token was bound to a file.
    Issued {
        /// The shared file.
        file_id: EntityId,
    },
    /// A token was cleared by an explicit revoke.
    Revoked {
        /// The file.
        file_id: EntityId,
    },
    /// A token was cleared because the file went to the trash.
    InvalidatedByTrash {
        /// The file.
        file_id: EntityId,
    },
}
