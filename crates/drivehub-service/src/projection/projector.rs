//! Hierarchy projector: folder contents, root, recent, trash and search.
//!
//! Every view is computed from a single store snapshot, so it is internally
//! consistent even while writers commit concurrently. Nothing is cached;
//! callers re-invoke a projection after each refresh trigger. Views only
//! ever contain the session user's own entries.

use std::cmp::Ordering;

use tracing::debug;

use drivehub_core::error::AppError;
use drivehub_core::result::AppResult;
use drivehub_core::types::EntityId;
use drivehub_entity::{Entry, File, Folder};

use crate::context::SessionContext;
use crate::store::{EntityStore, StoreState};

use super::views::{Breadcrumb, FolderContents, FolderPath, RootListing};

/// Read-only views over the entity store.
#[derive(Debug, Clone)]
pub struct HierarchyProjector {
    /// Entity store handle.
    store: EntityStore,
    /// Bound applied to `recent_files` when the caller gives none.
    default_recent_limit: usize,
}

impl HierarchyProjector {
    /// Creates a new projector.
    pub fn new(store: EntityStore, default_recent_limit: usize) -> Self {
        Self {
            store,
            default_recent_limit,
        }
    }

    /// Active direct children of an active folder.
    pub async fn folder_contents(
        &self,
        ctx: &SessionContext,
        folder_id: EntityId,
    ) -> AppResult<FolderContents> {
        let state = self.store.snapshot().await;
        let folder = state
            .owned_folder(ctx.user_id, folder_id)
            .filter(|f| !f.is_trashed())
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let (folders, files) = active_children(&state, ctx, Some(folder_id));
        Ok(FolderContents {
            folder,
            folders,
            files,
        })
    }

    /// Active folders and files with no parent.
    pub async fn root_listing(&self, ctx: &SessionContext) -> AppResult<RootListing> {
        let state = self.store.snapshot().await;
        let (folders, files) = active_children(&state, ctx, None);
        Ok(RootListing { folders, files })
    }

    /// Most recently modified active files, newest first.
    pub async fn recent_files(
        &self,
        ctx: &SessionContext,
        limit: Option<usize>,
    ) -> AppResult<Vec<File>> {
        let limit = limit.unwrap_or(self.default_recent_limit);
        let state = self.store.snapshot().await;

        let mut files: Vec<File> = state
            .files_of(ctx.user_id)
            .filter(|f| !f.is_trashed())
            .cloned()
            .collect();
        files.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        files.truncate(limit);
        Ok(files)
    }

    /// Every trashed file and folder, most recently trashed first.
    pub async fn trash_listing(&self, ctx: &SessionContext) -> AppResult<Vec<Entry>> {
        let state = self.store.snapshot().await;

        let mut entries: Vec<Entry> = state
            .folders_of(ctx.user_id)
            .filter(|f| f.is_trashed())
            .cloned()
            .map(Entry::Folder)
            .chain(
                state
                    .files_of(ctx.user_id)
                    .filter(|f| f.is_trashed())
                    .cloned()
                    .map(Entry::File),
            )
            .collect();
        entries.sort_by(|a, b| {
            b.trashed_at()
                .cmp(&a.trashed_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(entries)
    }

    /// Active files whose name or MIME type contains `query`, ignoring case.
    ///
    /// The query is a plain substring, surrounding whitespace included. A
    /// query made only of whitespace matches nothing.
    pub async fn search(&self, ctx: &SessionContext, query: &str) -> AppResult<Vec<File>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();

        let state = self.store.snapshot().await;
        let mut hits: Vec<File> = state
            .files_of(ctx.user_id)
            .filter(|f| !f.is_trashed())
            .filter(|f| {
                f.name.to_lowercase().contains(&needle)
                    || f.mime_type
                        .as_deref()
                        .is_some_and(|m| m.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| by_name(&a.name, a.id, &b.name, b.id));

        debug!(query = %needle, hits = hits.len(), "Search completed");
        Ok(hits)
    }

    /// Breadcrumbs from root down to `folder_id`.
    pub async fn folder_path(
        &self,
        ctx: &SessionContext,
        folder_id: EntityId,
    ) -> AppResult<FolderPath> {
        let state = self.store.snapshot().await;
        let folder = state
            .owned_folder(ctx.user_id, folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let mut breadcrumbs: Vec<Breadcrumb> = state
            .ancestry(folder_id)
            .into_iter()
            .rev()
            .filter_map(|id| state.folder(id))
            .map(|f| Breadcrumb {
                id: f.id,
                name: f.name.clone(),
            })
            .collect();
        breadcrumbs.push(Breadcrumb {
            id: folder.id,
            name: folder.name.clone(),
        });

        let path = breadcrumbs
            .iter()
            .fold(String::new(), |acc, c| format!("{acc}/{}", c.name));
        Ok(FolderPath { path, breadcrumbs })
    }
}

fn active_children(
    state: &StoreState,
    ctx: &SessionContext,
    parent: Option<EntityId>,
) -> (Vec<Folder>, Vec<File>) {
    let mut folders: Vec<Folder> = state
        .child_folders(ctx.user_id, parent)
        .filter(|f| !f.is_trashed())
        .cloned()
        .collect();
    folders.sort_by(|a, b| by_name(&a.name, a.id, &b.name, b.id));

    let mut files: Vec<File> = state
        .child_files(ctx.user_id, parent)
        .filter(|f| !f.is_trashed())
        .cloned()
        .collect();
    files.sort_by(|a, b| by_name(&a.name, a.id, &b.name, b.id));

    (folders, files)
}

fn by_name(a_name: &str, a_id: EntityId, b_name: &str, b_id: EntityId) -> Ordering {
    a_name
        .to_lowercase()
        .cmp(&b_name.to_lowercase())
        .then_with(|| a_id.cmp(&b_id))
}
