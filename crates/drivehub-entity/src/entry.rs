//! The `Entry` sum type: a file or a folder, discriminated explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_core::types::{EntityId, UserId};

use crate::file::File;
use crate::folder::Folder;
use crate::lifecycle::Lifecycle;

/// Which variant an [`Entry`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A file.
    File,
    /// A folder.
    Folder,
}

/// A file or folder record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// A file record.
    File(File),
    /// A folder record.
    Folder(Folder),
}

impl Entry {
    /// The entry id.
    pub fn id(&self) -> EntityId {
        match self {
            Self::File(f) => f.id,
            Self::Folder(f) => f.id,
        }
    }

    /// The entry name.
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Folder(f) => &f.name,
        }
    }

    /// The owning user.
    pub fn owner_id(&self) -> UserId {
        match self {
            Self::File(f) => f.owner_id,
            Self::Folder(f) => f.owner_id,
        }
    }

    /// The parent folder id.
    pub fn parent_id(&self) -> Option<EntityId> {
        match self {
            Self::File(f) => f.parent_id,
            Self::Folder(f) => f.parent_id,
        }
    }

    /// When the entry was trashed, if it is.
    pub fn trashed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::File(f) => f.trashed_at,
            Self::Folder(f) => f.trashed_at,
        }
    }

    /// The variant tag.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::File(_) => EntryKind::File,
            Self::Folder(_) => EntryKind::Folder,
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_trashed_at(self.trashed_at())
    }

    /// Borrow the file record, if this is one.
    pub fn as_file(&self) -> Option<&File> {
        match self {
            Self::File(f) => Some(f),
            Self::Folder(_) => None,
        }
    }

    /// Borrow the folder record, if this is one.
    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder(f) => Some(f),
            Self::File(_) => None,
        }
    }
}

impl From<File> for Entry {
    fn from(file: File) -> Self {
        Self::File(file)
    }
}

impl From<Folder> for Entry {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

/// Partial update of an entry: rename and/or move.
///
/// `parent_id` distinguishes "leave unchanged" (`None`) from "move to root"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPatch {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New parent.
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<EntityId>>,
}

impl EntryPatch {
    /// A patch that renames only.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent_id: None,
        }
    }

    /// A patch that moves only.
    pub fn move_to(parent_id: Option<EntityId>) -> Self {
        Self {
            name: None,
            parent_id: Some(parent_id),
        }
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_id.is_none()
    }
}

/// Serde helper so that an explicit `null` means "move to root" while an
/// absent field means "unchanged".
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
