//! Immutable snapshot of every stored file and folder.

use std::collections::{HashMap, HashSet, VecDeque};

use drivehub_core::types::{EntityId, UserId};
use drivehub_entity::{Entry, File, Folder};

/// A point-in-time view of the entity store.
///
/// Readers hold an `Arc<StoreState>` and never observe a later write; writers
/// mutate a private clone and publish it in one step.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub(crate) folders: HashMap<EntityId, Folder>,
    pub(crate) files: HashMap<EntityId, File>,
}

/// Ids found below a folder, split by variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descendants {
    /// Descendant folders, breadth-first.
    pub folders: Vec<EntityId>,
    /// Descendant files.
    pub files: Vec<EntityId>,
}

impl Descendants {
    /// Whether the folder has no descendants at all.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

impl StoreState {
    /// Look up a folder.
    pub fn folder(&self, id: EntityId) -> Option<&Folder> {
        self.folders.get(&id)
    }

    /// Look up a file.
    pub fn file(&self, id: EntityId) -> Option<&File> {
        self.files.get(&id)
    }

    /// Look up either variant.
    pub fn entry(&self, id: EntityId) -> Option<Entry> {
        self.files
            .get(&id)
            .cloned()
            .map(Entry::File)
            .or_else(|| self.folders.get(&id).cloned().map(Entry::Folder))
    }

    /// Look up a folder belonging to `owner`.
    ///
    /// Another user's folder is indistinguishable from a missing one.
    pub fn owned_folder(&self, owner: UserId, id: EntityId) -> Option<&Folder> {
        self.folders.get(&id).filter(|f| f.owner_id == owner)
    }

    /// Look up a file belonging to `owner`.
    pub fn owned_file(&self, owner: UserId, id: EntityId) -> Option<&File> {
        self.files.get(&id).filter(|f| f.owner_id == owner)
    }

    /// Look up either variant belonging to `owner`.
    pub fn owned_entry(&self, owner: UserId, id: EntityId) -> Option<Entry> {
        self.entry(id).filter(|e| e.owner_id() == owner)
    }

    /// Folders owned by `owner`, in no particular order.
    pub fn folders_of(&self, owner: UserId) -> impl Iterator<Item = &Folder> {
        self.folders.values().filter(move |f| f.owner_id == owner)
    }

    /// Files owned by `owner`, in no particular order.
    pub fn files_of(&self, owner: UserId) -> impl Iterator<Item = &File> {
        self.files.values().filter(move |f| f.owner_id == owner)
    }

    /// All folders, in no particular order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    /// All files, in no particular order.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    /// Whether the store holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct child folders of `parent` (None = root) owned by `owner`, any state.
    pub fn child_folders(
        &self,
        owner: UserId,
        parent: Option<EntityId>,
    ) -> impl Iterator<Item = &Folder> {
        self.folders_of(owner).filter(move |f| f.parent_id == parent)
    }

    /// Direct child files of `parent` (None = root) owned by `owner`, any state.
    pub fn child_files(
        &self,
        owner: UserId,
        parent: Option<EntityId>,
    ) -> impl Iterator<Item = &File> {
        self.files_of(owner).filter(move |f| f.parent_id == parent)
    }

    /// Ancestor folder ids of `id`, nearest first.
    ///
    /// The walk stops after visiting every folder once, so a corrupted
    /// parent graph cannot loop forever.
    pub fn ancestry(&self, id: EntityId) -> Vec<EntityId> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self
            .files
            .get(&id)
            .map(|f| f.parent_id)
            .or_else(|| self.folders.get(&id).map(|f| f.parent_id))
            .flatten();

        while let Some(parent_id) = cursor {
            if !seen.insert(parent_id) {
                break;
            }
            chain.push(parent_id);
            cursor = self.folders.get(&parent_id).and_then(|f| f.parent_id);
        }

        chain
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    pub fn is_descendant_of(&self, id: EntityId, ancestor: EntityId) -> bool {
        self.ancestry(id).contains(&ancestor)
    }

    /// Every folder and file below `folder_id`, at any depth and any state.
    pub fn descendants(&self, folder_id: EntityId) -> Descendants {
        let mut out = Descendants::default();
        let Some(owner) = self.folders.get(&folder_id).map(|f| f.owner_id) else {
            return out;
        };
        let mut queue = VecDeque::from([folder_id]);
        let mut seen = HashSet::from([folder_id]);

        while let Some(current) = queue.pop_front() {
            for child in self.child_folders(owner, Some(current)) {
                if seen.insert(child.id) {
                    out.folders.push(child.id);
                    queue.push_back(child.id);
                }
            }
            out.files
                .extend(self.child_files(owner, Some(current)).map(|f| f.id));
        }

        out
    }

    /// Whether one of `owner`'s folders named `name` already sits under `parent`.
    ///
    /// Trashed folders still reserve their name; `except` skips the folder
    /// being renamed or moved.
    pub fn folder_name_taken(
        &self,
        owner: UserId,
        parent: Option<EntityId>,
        name: &str,
        except: Option<EntityId>,
    ) -> bool {
        self.child_folders(owner, parent)
            .any(|f| f.name == name && Some(f.id) != except)
    }

    /// Check the acyclic invariant over the whole folder graph.
    pub fn is_acyclic(&self) -> bool {
        self.folders.keys().all(|id| {
            let mut seen = HashSet::from([*id]);
            let mut cursor = self.folders.get(id).and_then(|f| f.parent_id);
            while let Some(parent) = cursor {
                if !seen.insert(parent) {
                    return false;
                }
                cursor = self.folders.get(&parent).and_then(|f| f.parent_id);
            }
            true
        })
    }
}
