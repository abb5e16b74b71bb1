//! The entity store: sole owner of file and folder records.
//!
//! Writes are copy-on-write. Each mutation runs against a private clone of
//! the current [`StoreState`] under the write lock and is published only if
//! it returns `Ok`, so a cascade either lands completely or not at all, and
//! a reader holding a snapshot never sees a half-applied subtree.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use drivehub_core::error::AppError;
use drivehub_core::result::AppResult;
use drivehub_core::types::{EntityId, UserId};
use drivehub_entity::{
    CreateFile, CreateFolder, Entry, EntryPatch, File, Folder, LifecycleEvent,
};

use super::state::StoreState;

/// Result of a trash transition.
#[derive(Debug, Clone)]
pub struct TrashOutcome {
    /// The entry the caller trashed, in its new state.
    pub entry: Entry,
    /// Every entry whose state changed, the root first.
    pub affected: Vec<EntityId>,
    /// Files whose share token was cleared by the transition.
    pub unshared: Vec<EntityId>,
}

/// Result of a purge.
#[derive(Debug, Clone, Default)]
pub struct PurgeOutcome {
    /// Records removed from the store, the purged root first.
    pub removed: Vec<Entry>,
    /// Active descendants re-parented to root.
    pub promoted: Vec<EntityId>,
}

impl PurgeOutcome {
    /// Ids of removed records.
    pub fn removed_ids(&self) -> Vec<EntityId> {
        self.removed.iter().map(Entry::id).collect()
    }

    /// Transport keys of removed files.
    pub fn storage_keys(&self) -> Vec<String> {
        self.removed
            .iter()
            .filter_map(|e| e.as_file().map(|f| f.storage_key.clone()))
            .collect()
    }
}

/// Durable owner of every file and folder record.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    state: Arc<RwLock<Arc<StoreState>>>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A consistent point-in-time view for read projections.
    pub async fn snapshot(&self) -> Arc<StoreState> {
        Arc::clone(&*self.state.read().await)
    }

    /// Apply `op` to a working copy and publish it only on success.
    async fn commit<T>(&self, op: impl FnOnce(&mut StoreState) -> AppResult<T>) -> AppResult<T> {
        let mut guard = self.state.write().await;
        let mut working = (**guard).clone();
        let out = op(&mut working)?;
        *guard = Arc::new(working);
        Ok(out)
    }

    /// Creates a folder under `parent_id` (or at root).
    ///
    /// The parent must belong to the same owner.
    pub async fn create_folder(&self, req: CreateFolder) -> AppResult<Folder> {
        let name = validate_name(&req.name)?;
        let owner = req.owner_id;

        self.commit(|state| {
            if let Some(parent_id) = req.parent_id {
                require_active_parent(state, owner, parent_id)?;
            }
            if state.folder_name_taken(owner, req.parent_id, &name, None) {
                return Err(AppError::validation(format!(
                    "A folder named '{name}' already exists here"
                )));
            }

            let folder = Folder {
                id: EntityId::new(),
                owner_id: owner,
                name,
                parent_id: req.parent_id,
                created_at: Utc::now(),
                trashed_at: None,
            };
            state.folders.insert(folder.id, folder.clone());
            debug!(folder_id = %folder.id, "Folder record inserted");
            Ok(folder)
        })
        .await
    }

    /// Creates an active file record for already-transferred content.
    pub async fn create_file(&self, req: CreateFile) -> AppResult<File> {
        let name = validate_name(&req.name)?;
        if req.size_bytes < 0 {
            return Err(AppError::validation("File size cannot be negative"));
        }

        self.commit(|state| {
            if let Some(parent_id) = req.parent_id {
                require_active_parent(state, req.owner_id, parent_id)?;
            }

            let now = Utc::now();
            let file = File {
                id: EntityId::new(),
                owner_id: req.owner_id,
                name,
                size_bytes: req.size_bytes,
                mime_type: req.mime_type,
                parent_id: req.parent_id,
                storage_key: req.storage_key,
                created_at: now,
                modified_at: now,
                trashed_at: None,
                share_token: None,
            };
            state.files.insert(file.id, file.clone());
            debug!(file_id = %file.id, "File record inserted");
            Ok(file)
        })
        .await
    }

    /// Fetches an entry of either kind owned by `owner`.
    pub async fn get(&self, owner: UserId, id: EntityId) -> AppResult<Entry> {
        self.snapshot()
            .await
            .owned_entry(owner, id)
            .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))
    }

    /// Fetches a file owned by `owner`.
    pub async fn get_file(&self, owner: UserId, id: EntityId) -> AppResult<File> {
        self.snapshot()
            .await
            .owned_file(owner, id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Fetches a folder owned by `owner`.
    pub async fn get_folder(&self, owner: UserId, id: EntityId) -> AppResult<Folder> {
        self.snapshot()
            .await
            .owned_folder(owner, id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Renames and/or moves an active entry.
    pub async fn update(&self, owner: UserId, id: EntityId, patch: EntryPatch) -> AppResult<Entry> {
        let new_name = patch.name.as_deref().map(validate_name).transpose()?;

        self.commit(|state| {
            if let Some(mut file) = state.owned_file(owner, id).cloned() {
                if file.is_trashed() {
                    return Err(AppError::invalid_state(
                        "Cannot update a file while it is in the trash",
                    ));
                }
                if let Some(parent) = patch.parent_id {
                    if let Some(parent_id) = parent {
                        require_active_parent(state, owner, parent_id)?;
                    }
                    file.parent_id = parent;
                }
                if let Some(name) = new_name {
                    file.name = name;
                }
                file.modified_at = Utc::now();
                state.files.insert(id, file.clone());
                return Ok(Entry::File(file));
            }

            let mut folder = state
                .owned_folder(owner, id)
                .cloned()
                .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))?;
            if folder.is_trashed() {
                return Err(AppError::invalid_state(
                    "Cannot update a folder while it is in the trash",
                ));
            }

            let parent = match patch.parent_id {
                Some(Some(parent_id)) => {
                    if parent_id == id || state.is_descendant_of(parent_id, id) {
                        return Err(AppError::validation(
                            "Cannot move a folder into itself or one of its descendants",
                        ));
                    }
                    require_active_parent(state, owner, parent_id)?;
                    Some(parent_id)
                }
                Some(None) => None,
                None => folder.parent_id,
            };
            let name = new_name.unwrap_or_else(|| folder.name.clone());

            if state.folder_name_taken(owner, parent, &name, Some(id)) {
                return Err(AppError::validation(format!(
                    "A folder named '{name}' already exists here"
                )));
            }

            folder.name = name;
            folder.parent_id = parent;
            state.folders.insert(id, folder.clone());
            Ok(Entry::Folder(folder))
        })
        .await
    }

    /// Binds `token` to an active file unless it already has one.
    ///
    /// Returns the file and whether `token` was newly bound.
    pub async fn bind_share_token(
        &self,
        owner: UserId,
        id: EntityId,
        token: String,
    ) -> AppResult<(File, bool)> {
        self.commit(|state| {
            let file = state
                .files
                .get_mut(&id)
                .filter(|f| f.owner_id == owner)
                .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
            if file.is_trashed() {
                return Err(AppError::invalid_state("Cannot share a file in the trash"));
            }
            if file.share_token.is_some() {
                return Ok((file.clone(), false));
            }
            file.share_token = Some(token);
            file.modified_at = Utc::now();
            Ok((file.clone(), true))
        })
        .await
    }

    /// Clears the share token of a file. Returns whether one was set.
    pub async fn clear_share_token(&self, owner: UserId, id: EntityId) -> AppResult<(File, bool)> {
        self.commit(|state| {
            let file = state
                .files
                .get_mut(&id)
                .filter(|f| f.owner_id == owner)
                .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
            if file.share_token.take().is_none() {
                return Ok((file.clone(), false));
            }
            file.modified_at = Utc::now();
            Ok((file.clone(), true))
        })
        .await
    }

    /// Finds the active file bound to `token`, whoever owns it.
    pub async fn find_by_share_token(&self, token: &str) -> AppResult<File> {
        self.snapshot()
            .await
            .files()
            .find(|f| !f.is_trashed() && f.share_token.as_deref() == Some(token))
            .cloned()
            .ok_or_else(|| AppError::not_found("Share link not found"))
    }

    /// Moves an active entry to the trash. Folders cascade to every active
    /// descendant in the same commit. Trashed files lose their share token.
    pub async fn trash(&self, owner: UserId, id: EntityId) -> AppResult<TrashOutcome> {
        self.commit(|state| {
            let entry = state
                .owned_entry(owner, id)
                .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))?;
            entry.lifecycle().apply(LifecycleEvent::Trash)?;

            let now = Utc::now();
            let mut affected = vec![id];
            let mut unshared = Vec::new();

            match entry {
                Entry::File(_) => {
                    if let Some(file) = state.files.get_mut(&id) {
                        trash_file(file, now, &mut unshared);
                    }
                }
                Entry::Folder(_) => {
                    let below = state.descendants(id);
                    if let Some(folder) = state.folders.get_mut(&id) {
                        folder.trashed_at = Some(now);
                    }
                    for folder_id in below.folders {
                        if let Some(folder) = state.folders.get_mut(&folder_id) {
                            if !folder.is_trashed() {
                                folder.trashed_at = Some(now);
                                affected.push(folder_id);
                            }
                        }
                    }
                    for file_id in below.files {
                        if let Some(file) = state.files.get_mut(&file_id) {
                            if !file.is_trashed() {
                                trash_file(file, now, &mut unshared);
                                affected.push(file_id);
                            }
                        }
                    }
                }
            }

            let entry = state
                .entry(id)
                .ok_or_else(|| AppError::internal("Trashed entry vanished mid-commit"))?;
            Ok(TrashOutcome {
                entry,
                affected,
                unshared,
            })
        })
        .await
    }

    /// Brings a trashed entry back. Never touches descendants.
    pub async fn restore(&self, owner: UserId, id: EntityId) -> AppResult<Entry> {
        self.commit(|state| {
            let entry = state
                .owned_entry(owner, id)
                .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))?;
            entry.lifecycle().apply(LifecycleEvent::Restore)?;

            match entry {
                Entry::File(mut file) => {
                    file.trashed_at = None;
                    file.modified_at = Utc::now();
                    state.files.insert(id, file.clone());
                    Ok(Entry::File(file))
                }
                Entry::Folder(mut folder) => {
                    folder.trashed_at = None;
                    state.folders.insert(id, folder.clone());
                    Ok(Entry::Folder(folder))
                }
            }
        })
        .await
    }

    /// Permanently removes a trashed entry.
    ///
    /// For a folder, every trashed descendant reachable through trashed
    /// folders is removed too. Active descendants met on the way are
    /// re-parented to root together with their own subtrees; if that would
    /// duplicate a root folder name the whole purge is rejected.
    pub async fn purge(&self, owner: UserId, id: EntityId) -> AppResult<PurgeOutcome> {
        self.commit(|state| {
            let entry = state
                .owned_entry(owner, id)
                .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))?;
            entry.lifecycle().apply(LifecycleEvent::Purge)?;

            let mut outcome = PurgeOutcome::default();

            if let Entry::File(_) = entry {
                if let Some(file) = state.files.remove(&id) {
                    outcome.removed.push(Entry::File(file));
                }
                return Ok(outcome);
            }

            let mut stack = vec![id];
            let mut orphan_folders = Vec::new();
            let mut orphan_files = Vec::new();

            while let Some(current) = stack.pop() {
                if let Some(folder) = state.folders.remove(&current) {
                    outcome.removed.push(Entry::Folder(folder));
                }

                let child_folders: Vec<(EntityId, bool)> = state
                    .child_folders(owner, Some(current))
                    .map(|f| (f.id, f.is_trashed()))
                    .collect();
                for (child_id, trashed) in child_folders {
                    if trashed {
                        stack.push(child_id);
                    } else {
                        orphan_folders.push(child_id);
                    }
                }

                let child_files: Vec<(EntityId, bool)> = state
                    .child_files(owner, Some(current))
                    .map(|f| (f.id, f.is_trashed()))
                    .collect();
                for (child_id, trashed) in child_files {
                    if !trashed {
                        orphan_files.push(child_id);
                    } else if let Some(file) = state.files.remove(&child_id) {
                        outcome.removed.push(Entry::File(file));
                    }
                }
            }

            for folder_id in orphan_folders {
                let Some(name) = state.folders.get(&folder_id).map(|f| f.name.clone()) else {
                    continue;
                };
                if state.folder_name_taken(owner, None, &name, Some(folder_id)) {
                    return Err(AppError::invalid_state(format!(
                        "Cannot purge: active folder '{name}' would collide with an existing root folder"
                    )));
                }
                if let Some(folder) = state.folders.get_mut(&folder_id) {
                    folder.parent_id = None;
                }
                outcome.promoted.push(folder_id);
            }

            let now = Utc::now();
            for file_id in orphan_files {
                if let Some(file) = state.files.get_mut(&file_id) {
                    file.parent_id = None;
                    file.modified_at = now;
                    outcome.promoted.push(file_id);
                }
            }

            Ok(outcome)
        })
        .await
    }
}

fn trash_file(file: &mut File, now: DateTime<Utc>, unshared: &mut Vec<EntityId>) {
    file.trashed_at = Some(now);
    file.modified_at = now;
    if file.share_token.take().is_some() {
        unshared.push(file.id);
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    if trimmed.contains('/') {
        return Err(AppError::validation("Name cannot contain '/'"));
    }
    Ok(trimmed.to_string())
}

fn require_active_parent(
    state: &StoreState,
    owner: UserId,
    parent_id: EntityId,
) -> AppResult<&Folder> {
    let parent = state.owned_folder(owner, parent_id).ok_or_else(|| {
        AppError::validation(format!("Parent folder {parent_id} does not exist"))
    })?;
    if parent.is_trashed() {
        return Err(AppError::validation(format!(
            "Parent folder {parent_id} is in the trash"
        )));
    }
    Ok(parent)
}


#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use drivehub_core::error::ErrorKind;
    use drivehub_entity::Lifecycle;

    use super::*;

    const ME: UserId = UserId(Uuid::from_u128(1));
    const OTHER: UserId = UserId(Uuid::from_u128(2));

    async fn folder(store: &EntityStore, name: &str, parent: Option<EntityId>) -> Folder {
        folder_of(store, ME, name, parent).await
    }

    async fn folder_of(
        store: &EntityStore,
        owner: UserId,
        name: &str,
        parent: Option<EntityId>,
    ) -> Folder {
        store
            .create_folder(CreateFolder {
                owner_id: owner,
                name: name.into(),
                parent_id: parent,
            })
            .await
            .unwrap()
    }

    async fn file(store: &EntityStore, name: &str, parent: Option<EntityId>) -> File {
        store
            .create_file(CreateFile {
                owner_id: ME,
                name: name.into(),
                size_bytes: 10,
                mime_type: None,
                parent_id: parent,
                storage_key: format!("key/{name}"),
            })
            .await
            .unwrap()
    }

    async fn state_of(store: &EntityStore, id: EntityId) -> Lifecycle {
        store.get(ME, id).await.unwrap().lifecycle()
    }

    #[tokio::test]
    async fn test_create_folder_validation() {
        let store = EntityStore::new();

        let err = store
            .create_folder(CreateFolder {
                owner_id: ME,
                name: "   ".into(),
                parent_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = store
            .create_folder(CreateFolder {
                owner_id: ME,
                name: "orphan".into(),
                parent_id: Some(EntityId::new()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let parent = folder(&store, "parent", None).await;
        store.trash(ME, parent.id).await.unwrap();
        let err = store
            .create_folder(CreateFolder {
                owner_id: ME,
                name: "child".into(),
                parent_id: Some(parent.id),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_sibling_folder_names_are_unique() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        folder(&store, "B", Some(a.id)).await;

        let err = store
            .create_folder(CreateFolder {
                owner_id: ME,
                name: "B".into(),
                parent_id: Some(a.id),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        // Same name under a different parent is fine.
        folder(&store, "B", None).await;
    }

    #[tokio::test]
    async fn test_negative_size_rejected() {
        let store = EntityStore::new();
        let err = store
            .create_file(CreateFile {
                owner_id: ME,
                name: "x.txt".into(),
                size_bytes: -1,
                mime_type: None,
                parent_id: None,
                storage_key: "k".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = EntityStore::new();
        let err = store.get(ME, EntityId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_other_owner_sees_nothing() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        let x = file(&store, "x.txt", Some(a.id)).await;

        for id in [a.id, x.id] {
            assert_eq!(store.get(OTHER, id).await.unwrap_err().kind, ErrorKind::NotFound);
            assert_eq!(
                store.trash(OTHER, id).await.unwrap_err().kind,
                ErrorKind::NotFound
            );
            assert_eq!(
                store
                    .update(OTHER, id, EntryPatch::rename("mine"))
                    .await
                    .unwrap_err()
                    .kind,
                ErrorKind::NotFound
            );
        }
        assert_eq!(
            store
                .bind_share_token(OTHER, x.id, "t".into())
                .await
                .unwrap_err()
                .kind,
            ErrorKind::NotFound
        );

        // Another user's folder is not a valid parent.
        let err = store
            .create_folder(CreateFolder {
                owner_id: OTHER,
                name: "intruder".into(),
                parent_id: Some(a.id),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        // Root names are reserved per owner.
        folder_of(&store, OTHER, "A", None).await;

        store.trash(ME, a.id).await.unwrap();
        assert_eq!(
            store.purge(OTHER, a.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(state_of(&store, x.id).await, Lifecycle::Trashed);
    }

    #[tokio::test]
    async fn test_update_trashed_is_invalid_state() {
        let store = EntityStore::new();
        let f = file(&store, "a.txt", None).await;
        store.trash(ME, f.id).await.unwrap();

        let err = store
            .update(ME, f.id, EntryPatch::rename("b.txt"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_update_file_touches_modified_at() {
        let store = EntityStore::new();
        let f = file(&store, "a.txt", None).await;
        let updated = store
            .update(ME, f.id, EntryPatch::rename("b.txt"))
            .await
            .unwrap();
        let updated = updated.as_file().unwrap();
        assert_eq!(updated.name, "b.txt");
        assert!(updated.modified_at >= f.modified_at);
    }

    #[tokio::test]
    async fn test_move_into_descendant_rejected() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        let b = folder(&store, "B", Some(a.id)).await;
        let c = folder(&store, "C", Some(b.id)).await;

        for target in [a.id, c.id] {
            let err = store
                .update(ME, a.id, EntryPatch::move_to(Some(target)))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert!(store.snapshot().await.is_acyclic());

        store
            .update(ME, c.id, EntryPatch::move_to(None))
            .await
            .unwrap();
        store
            .update(ME, a.id, EntryPatch::move_to(Some(c.id)))
            .await
            .unwrap();
        let snapshot = store.snapshot().await;
        assert!(snapshot.is_acyclic());
        assert_eq!(snapshot.ancestry(b.id), vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn test_trash_folder_cascades_to_active_descendants() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        let b = folder(&store, "B", Some(a.id)).await;
        let x = file(&store, "x.txt", Some(b.id)).await;
        let y = file(&store, "y.txt", Some(a.id)).await;

        let outcome = store.trash(ME, a.id).await.unwrap();
        assert_eq!(outcome.affected.len(), 4);
        assert_eq!(outcome.affected[0], a.id);
        for id in [a.id, b.id, x.id, y.id] {
            assert_eq!(state_of(&store, id).await, Lifecycle::Trashed);
        }
    }

    #[tokio::test]
    async fn test_trash_twice_is_invalid_state() {
        let store = EntityStore::new();
        let f = file(&store, "a.txt", None).await;
        store.trash(ME, f.id).await.unwrap();
        let err = store.trash(ME, f.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_restore_does_not_cascade() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        let x = file(&store, "x.txt", Some(a.id)).await;
        store.trash(ME, a.id).await.unwrap();

        store.restore(ME, a.id).await.unwrap();
        assert_eq!(state_of(&store, a.id).await, Lifecycle::Active);
        assert_eq!(state_of(&store, x.id).await, Lifecycle::Trashed);
    }

    #[tokio::test]
    async fn test_purge_requires_trash() {
        let store = EntityStore::new();
        let f = file(&store, "a.txt", None).await;
        let err = store.purge(ME, f.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
        assert!(store.get(ME, f.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_purge_folder_removes_trashed_subtree() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        let b = folder(&store, "B", Some(a.id)).await;
        let x = file(&store, "x.txt", Some(b.id)).await;
        store.trash(ME, a.id).await.unwrap();

        let outcome = store.purge(ME, a.id).await.unwrap();
        assert_eq!(outcome.removed.len(), 3);
        assert_eq!(outcome.storage_keys(), vec!["key/x.txt".to_string()]);
        assert!(outcome.promoted.is_empty());
        for id in [a.id, b.id, x.id] {
            assert_eq!(
                store.get(ME, id).await.unwrap_err().kind,
                ErrorKind::NotFound
            );
        }
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_purge_promotes_restored_descendants() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        let b = folder(&store, "B", Some(a.id)).await;
        let x = file(&store, "x.txt", Some(b.id)).await;
        store.trash(ME, a.id).await.unwrap();
        store.restore(ME, b.id).await.unwrap();

        // Another user's root folder of the same name does not collide.
        folder_of(&store, OTHER, "B", None).await;

        let outcome = store.purge(ME, a.id).await.unwrap();
        assert_eq!(outcome.removed_ids(), vec![a.id]);
        assert_eq!(outcome.promoted, vec![b.id]);

        let b_now = store.get_folder(ME, b.id).await.unwrap();
        assert!(b_now.is_root());
        assert!(!b_now.is_trashed());
        let x_now = store.get_file(ME, x.id).await.unwrap();
        assert_eq!(x_now.parent_id, Some(b.id));
        assert!(x_now.is_trashed());
    }

    #[tokio::test]
    async fn test_purge_rolls_back_on_root_name_collision() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        let b = folder(&store, "B", Some(a.id)).await;
        let t = file(&store, "t.txt", Some(a.id)).await;
        store.trash(ME, a.id).await.unwrap();
        store.restore(ME, b.id).await.unwrap();
        folder(&store, "B", None).await;

        let err = store.purge(ME, a.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);

        // Nothing of the cascade is observable.
        assert_eq!(state_of(&store, a.id).await, Lifecycle::Trashed);
        assert_eq!(state_of(&store, t.id).await, Lifecycle::Trashed);
        assert_eq!(
            store.get_folder(ME, b.id).await.unwrap().parent_id,
            Some(a.id)
        );
    }

    #[tokio::test]
    async fn test_snapshot_is_isolated_from_later_writes() {
        let store = EntityStore::new();
        let a = folder(&store, "A", None).await;
        file(&store, "x.txt", Some(a.id)).await;

        let before = store.snapshot().await;
        store.trash(ME, a.id).await.unwrap();

        assert!(before.files().all(|f| !f.is_trashed()));
        assert!(before.folders().all(|f| !f.is_trashed()));
        let after = store.snapshot().await;
        assert!(after.files().all(|f| f.is_trashed()));
    }

    #[tokio::test]
    async fn test_share_token_binding() {
        let store = EntityStore::new();
        let f = file(&store, "a.txt", None).await;

        let (shared, bound) = store
            .bind_share_token(ME, f.id, "t1".into())
            .await
            .unwrap();
        assert!(bound);
        assert_eq!(shared.share_token.as_deref(), Some("t1"));

        let (again, bound) = store
            .bind_share_token(ME, f.id, "t2".into())
            .await
            .unwrap();
        assert!(!bound);
        assert_eq!(again.share_token.as_deref(), Some("t1"));

        let outcome = store.trash(ME, f.id).await.unwrap();
        assert_eq!(outcome.unshared, vec![f.id]);
        assert!(store.get_file(ME, f.id).await.unwrap().share_token.is_none());
        assert!(store.find_by_share_token("t1").await.is_err());

        let err = store
            .bind_share_token(ME, f.id, "t3".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }
}
