//! Entry CRUD: folder creation, lookup, rename/move, and download.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use drivehub_core::error::AppError;
use drivehub_core::events::EntryEvent;
use drivehub_core::result::AppResult;
use drivehub_core::traits::UploadTransport;
use drivehub_core::types::EntityId;
use drivehub_entity::{CreateFolder, Entry, EntryPatch, File, Folder};

use crate::context::SessionContext;
use crate::events::EventBus;
use crate::store::EntityStore;

/// Manages entry CRUD outside the lifecycle state machine.
#[derive(Debug, Clone)]
pub struct EntryService {
    /// Entity store handle.
    store: EntityStore,
    /// Event bus.
    events: EventBus,
    /// Content transport.
    transport: Arc<dyn UploadTransport>,
}

impl EntryService {
    /// Creates a new entry service.
    pub fn new(store: EntityStore, events: EventBus, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            store,
            events,
            transport,
        }
    }

    /// Creates a folder owned by the session user, at root or under one of
    /// their active folders.
    pub async fn create_folder(
        &self,
        ctx: &SessionContext,
        name: impl Into<String>,
        parent_id: Option<EntityId>,
    ) -> AppResult<Folder> {
        let folder = self
            .store
            .create_folder(CreateFolder {
                owner_id: ctx.user_id,
                name: name.into(),
                parent_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            name = %folder.name,
            "Folder created"
        );
        self.events.publish(
            ctx,
            EntryEvent::FolderCreated {
                folder_id: folder.id,
                parent_id: folder.parent_id,
            },
        );

        Ok(folder)
    }

    /// Gets one of the session user's entries, active or trashed.
    pub async fn get(&self, ctx: &SessionContext, id: EntityId) -> AppResult<Entry> {
        self.store.get(ctx.user_id, id).await
    }

    /// Gets one of the session user's file records.
    pub async fn get_file(&self, ctx: &SessionContext, id: EntityId) -> AppResult<File> {
        self.store.get_file(ctx.user_id, id).await
    }

    /// Renames and/or moves an active entry.
    pub async fn update(
        &self,
        ctx: &SessionContext,
        id: EntityId,
        patch: EntryPatch,
    ) -> AppResult<Entry> {
        if patch.is_empty() {
            return Err(AppError::validation("Update must set a name or a parent"));
        }

        let entry = self.store.update(ctx.user_id, id, patch).await?;

        info!(user_id = %ctx.user_id, entry_id = %id, "Entry updated");
        self.events.publish(ctx, EntryEvent::Updated { id });

        Ok(entry)
    }

    /// Fetches an active file together with its content.
    pub async fn download(&self, ctx: &SessionContext, id: EntityId) -> AppResult<(File, Bytes)> {
        let file = self.store.get_file(ctx.user_id, id).await?;
        if file.is_trashed() {
            return Err(AppError::invalid_state(
                "Cannot download a file while it is in the trash",
            ));
        }

        let content = self.read_content(&file).await?;
        info!(user_id = %ctx.user_id, file_id = %id, size = content.len(), "File downloaded");
        Ok((file, content))
    }

    /// Reads the stored content of `file` through the transport.
    pub async fn read_content(&self, file: &File) -> AppResult<Bytes> {
        self.transport.get(&file.storage_key).await
    }
}

#[cfg(test)]
mod tests {
    use drivehub_core::error::ErrorKind;
    use drivehub_core::types::{SessionId, UserId};
    use drivehub_entity::CreateFile;

    use super::*;
    use crate::upload::MemoryTransport;

    fn ctx() -> SessionContext {
        SessionContext::new(UserId::new(), SessionId::new())
    }

    fn service() -> (EntryService, Arc<MemoryTransport>) {
        let transport = Arc::new(MemoryTransport::new());
        let service = EntryService::new(EntityStore::new(), EventBus::default(), transport.clone());
        (service, transport)
    }

    #[tokio::test]
    async fn test_empty_patch_rejected() {
        let (service, _) = service();
        let me = ctx();
        let folder = service.create_folder(&me, "A", None).await.unwrap();
        assert_eq!(folder.owner_id, me.user_id);

        let err = service
            .update(&me, folder.id, EntryPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_download_returns_content() {
        let (service, transport) = service();
        let me = ctx();
        transport
            .put("blob", Bytes::from_static(b"hello"))
            .await
            .unwrap();
        let file = service
            .store
            .create_file(CreateFile {
                owner_id: me.user_id,
                name: "hello.txt".into(),
                size_bytes: 5,
                mime_type: Some("text/plain".into()),
                parent_id: None,
                storage_key: "blob".into(),
            })
            .await
            .unwrap();

        let (_, content) = service.download(&me, file.id).await.unwrap();
        assert_eq!(&content[..], b"hello");

        let err = service.download(&ctx(), file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        service.store.trash(me.user_id, file.id).await.unwrap();
        let err = service.download(&me, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }
}
