//! Lifecycle transitions with event publication and content cleanup.

use std::sync::Arc;

use tracing::{info, warn};

use drivehub_core::events::{EntryEvent, ShareEvent};
use drivehub_core::result::AppResult;
use drivehub_core::traits::UploadTransport;
use drivehub_core::types::EntityId;
use drivehub_entity::Entry;

use crate::context::SessionContext;
use crate::events::EventBus;
use crate::store::{EntityStore, PurgeOutcome};

/// Drives entries through `Active -> Trashed -> Active | Purged`.
///
/// Trash cascades to every active descendant of a folder; restore never
/// cascades; purge removes the trashed subtree and promotes any active
/// descendant to root. Each call is one atomic store commit.
#[derive(Debug, Clone)]
pub struct LifecycleManager {
    /// Entity store handle.
    store: EntityStore,
    /// Event bus.
    events: EventBus,
    /// Content transport, for removing purged file bytes.
    transport: Arc<dyn UploadTransport>,
}

impl LifecycleManager {
    /// Creates a new lifecycle manager.
    pub fn new(store: EntityStore, events: EventBus, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            store,
            events,
            transport,
        }
    }

    /// Moves an active entry (and, for a folder, its active subtree) to the trash.
    pub async fn trash(&self, ctx: &SessionContext, id: EntityId) -> AppResult<Entry> {
        let outcome = self.store.trash(ctx.user_id, id).await?;

        for file_id in &outcome.unshared {
            self.events
                .publish(ctx, ShareEvent::InvalidatedByTrash { file_id: *file_id });
        }
        info!(
            user_id = %ctx.user_id,
            entry_id = %id,
            affected = outcome.affected.len(),
            unshared = outcome.unshared.len(),
            "Entry trashed"
        );
        self.events.publish(
            ctx,
            EntryEvent::Trashed {
                id,
                affected: outcome.affected,
            },
        );

        Ok(outcome.entry)
    }

    /// Restores a trashed entry. Descendants keep their own state.
    pub async fn restore(&self, ctx: &SessionContext, id: EntityId) -> AppResult<Entry> {
        let entry = self.store.restore(ctx.user_id, id).await?;

        info!(user_id = %ctx.user_id, entry_id = %id, "Entry restored");
        self.events.publish(ctx, EntryEvent::Restored { id });

        Ok(entry)
    }

    /// Permanently removes a trashed entry and its trashed descendants.
    pub async fn purge(&self, ctx: &SessionContext, id: EntityId) -> AppResult<PurgeOutcome> {
        let outcome = self.store.purge(ctx.user_id, id).await?;

        for key in outcome.storage_keys() {
            if let Err(e) = self.transport.delete(&key).await {
                warn!(storage_key = %key, error = %e, "Failed to delete purged content");
            }
        }

        info!(
            user_id = %ctx.user_id,
            entry_id = %id,
            removed = outcome.removed.len(),
            promoted = outcome.promoted.len(),
            "Entry purged"
        );
        self.events.publish(
            ctx,
            EntryEvent::Purged {
                id,
                removed: outcome.removed_ids(),
                promoted: outcome.promoted.clone(),
            },
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use drivehub_core::error::ErrorKind;
    use drivehub_core::events::EventPayload;
    use drivehub_core::types::{SessionId, UserId};
    use drivehub_entity::{CreateFile, CreateFolder, Lifecycle};

    use super::*;
    use crate::upload::MemoryTransport;

    fn ctx() -> SessionContext {
        SessionContext::new(UserId::new(), SessionId::new())
    }

    #[tokio::test]
    async fn test_purge_deletes_stored_content() {
        let store = EntityStore::new();
        let transport = Arc::new(MemoryTransport::new());
        let manager = LifecycleManager::new(store.clone(), EventBus::default(), transport.clone());
        let me = ctx();

        transport.put("blob-1", Bytes::from_static(b"abc")).await.unwrap();
        let file = store
            .create_file(CreateFile {
                owner_id: me.user_id,
                name: "a.txt".into(),
                size_bytes: 3,
                mime_type: None,
                parent_id: None,
                storage_key: "blob-1".into(),
            })
            .await
            .unwrap();

        manager.trash(&me, file.id).await.unwrap();
        manager.purge(&me, file.id).await.unwrap();

        assert!(transport.is_empty());
        let err = store.get(me.user_id, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_trash_publishes_cascade() {
        let store = EntityStore::new();
        let events = EventBus::default();
        let manager = LifecycleManager::new(
            store.clone(),
            events.clone(),
            Arc::new(MemoryTransport::new()),
        );
        let mut rx = events.subscribe();
        let me = ctx();

        let folder = store
            .create_folder(CreateFolder {
                owner_id: me.user_id,
                name: "A".into(),
                parent_id: None,
            })
            .await
            .unwrap();
        let file = store
            .create_file(CreateFile {
                owner_id: me.user_id,
                name: "x.txt".into(),
                size_bytes: 1,
                mime_type: None,
                parent_id: Some(folder.id),
                storage_key: "x".into(),
            })
            .await
            .unwrap();
        store
            .bind_share_token(me.user_id, file.id, "tok".into())
            .await
            .unwrap();

        let entry = manager.trash(&me, folder.id).await.unwrap();
        assert_eq!(entry.lifecycle(), Lifecycle::Trashed);

        let first = rx.try_recv().unwrap();
        assert!(matches!(
            first.payload,
            EventPayload::Share(ShareEvent::InvalidatedByTrash { file_id }) if file_id == file.id
        ));
        let second = rx.try_recv().unwrap();
        match second.payload {
            EventPayload::Entry(EntryEvent::Trashed { id, affected }) => {
                assert_eq!(id, folder.id);
                assert_eq!(affected.len(), 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_restore_active_is_invalid_state() {
        let store = EntityStore::new();
        let manager = LifecycleManager::new(
            store.clone(),
            EventBus::default(),
            Arc::new(MemoryTransport::new()),
        );
        let me = ctx();
        let folder = store
            .create_folder(CreateFolder {
                owner_id: me.user_id,
                name: "A".into(),
                parent_id: None,
            })
            .await
            .unwrap();

        let err = manager.restore(&me, folder.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);

        // Someone else cannot trash it.
        let err = manager.trash(&ctx(), folder.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
