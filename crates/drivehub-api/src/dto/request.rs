//! Request DTOs.

use serde::{Deserialize, Serialize};

use drivehub_core::types::EntityId;

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder (absent = root).
    #[serde(default)]
    pub parent_id: Option<EntityId>,
}

/// `?limit=` for the recent files listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentQuery {
    /// Maximum number of files.
    pub limit: Option<usize>,
}

/// `?q=` for search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Search text.
    #[serde(default)]
    pub q: String,
}
