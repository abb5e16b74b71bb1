//! Shapes returned by the hierarchy projector.

use serde::{Deserialize, Serialize};

use drivehub_core::types::EntityId;
use drivehub_entity::{File, Folder};

/// Active direct children of one folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContents {
    /// The listed folder.
    pub folder: Folder,
    /// Active child folders, by name.
    pub folders: Vec<Folder>,
    /// Active child files, by name.
    pub files: Vec<File>,
}

/// Active entries at root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootListing {
    /// Active root folders, by name.
    pub folders: Vec<Folder>,
    /// Active root files, by name.
    pub files: Vec<File>,
}

impl RootListing {
    /// Whether root holds nothing active.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

/// One step of a folder path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder id.
    pub id: EntityId,
    /// Folder name.
    pub name: String,
}

/// Location of a folder, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderPath {
    /// `/`-joined names, e.g. `/Projects/2024`.
    pub path: String,
    /// The folders on the path, root first, ending with the folder itself.
    pub breadcrumbs: Vec<Breadcrumb>,
}
