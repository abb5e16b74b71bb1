//! Issue, revoke and resolve public share links.

use tracing::info;

use drivehub_core::error::AppError;
use drivehub_core::events::ShareEvent;
use drivehub_core::result::AppResult;
use drivehub_core::types::EntityId;
use drivehub_entity::File;
use drivehub_entity::share::ShareLink;

use super::token::TokenGenerator;
use crate::context::SessionContext;
use crate::events::EventBus;
use crate::store::EntityStore;

/// Binds anonymous-access tokens to files.
///
/// Issuing is idempotent: a file that is already shared keeps its token, so
/// links handed out earlier stay valid until an explicit revoke.
#[derive(Debug, Clone)]
pub struct ShareIssuer {
    /// Entity store handle.
    store: EntityStore,
    /// Event bus.
    events: EventBus,
    /// Token source.
    tokens: TokenGenerator,
    /// Public base URL for share links.
    base_url: String,
}

impl ShareIssuer {
    /// Creates a new share issuer.
    pub fn new(
        store: EntityStore,
        events: EventBus,
        tokens: TokenGenerator,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            events,
            tokens,
            base_url: base_url.into(),
        }
    }

    /// Shares an active file, returning its link.
    pub async fn issue(&self, ctx: &SessionContext, file_id: EntityId) -> AppResult<ShareLink> {
        let candidate = self.tokens.generate();
        let (file, bound) = self.store.bind_share_token(ctx.user_id, file_id, candidate).await?;

        let token = file
            .share_token
            .ok_or_else(|| AppError::internal("Share token missing after bind"))?;

        if bound {
            self.events.publish(ctx, ShareEvent::Issued { file_id });
            info!(user_id = %ctx.user_id, file_id = %file_id, "Share link issued");
        }

        Ok(ShareLink::new(file_id, token, &self.base_url))
    }

    /// Clears the share token. Revoking an unshared file is a no-op.
    pub async fn revoke(&self, ctx: &SessionContext, file_id: EntityId) -> AppResult<()> {
        let (_, cleared) = self.store.clear_share_token(ctx.user_id, file_id).await?;

        if cleared {
            self.events.publish(ctx, ShareEvent::Revoked { file_id });
            info!(user_id = %ctx.user_id, file_id = %file_id, "Share link revoked");
        }
        Ok(())
    }

    /// Looks up the active file bound to `token`. Anonymous: no owner check.
    pub async fn resolve(&self, token: &str) -> AppResult<File> {
        self.store.find_by_share_token(token).await
    }
}

#[cfg(test)]
mod tests {
    use drivehub_core::error::ErrorKind;
    use drivehub_core::events::EventPayload;
    use drivehub_core::types::{SessionId, UserId};
    use drivehub_entity::CreateFile;

    use super::*;

    fn ctx() -> SessionContext {
        SessionContext::new(UserId::new(), SessionId::new())
    }

    async fn setup() -> (ShareIssuer, EntityStore, EventBus, SessionContext, File) {
        let store = EntityStore::new();
        let events = EventBus::default();
        let issuer = ShareIssuer::new(
            store.clone(),
            events.clone(),
            TokenGenerator::default(),
            "https://drive.example",
        );
        let owner = ctx();
        let file = store
            .create_file(CreateFile {
                owner_id: owner.user_id,
                name: "doc.txt".into(),
                size_bytes: 3,
                mime_type: None,
                parent_id: None,
                storage_key: "k".into(),
            })
            .await
            .unwrap();
        (issuer, store, events, owner, file)
    }

    #[tokio::test]
    async fn test_issue_is_idempotent() {
        let (issuer, _, events, owner, file) = setup().await;
        let mut rx = events.subscribe();

        let first = issuer.issue(&owner, file.id).await.unwrap();
        let second = issuer.issue(&owner, file.id).await.unwrap();
        assert_eq!(first.token, second.token);
        assert_eq!(
            first.url,
            format!("https://drive.example/api/shared/{}", first.token)
        );

        let event = rx.try_recv().unwrap();
        assert!(matches!(
            event.payload,
            EventPayload::Share(ShareEvent::Issued { .. })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_revoke_then_issue_yields_new_token() {
        let (issuer, _, _, owner, file) = setup().await;

        let first = issuer.issue(&owner, file.id).await.unwrap();
        issuer.revoke(&owner, file.id).await.unwrap();
        issuer.revoke(&owner, file.id).await.unwrap();
        let second = issuer.issue(&owner, file.id).await.unwrap();
        assert_ne!(first.token, second.token);

        assert_eq!(
            issuer.resolve(&first.token).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(issuer.resolve(&second.token).await.unwrap().id, file.id);
    }

    #[tokio::test]
    async fn test_issue_on_trashed_or_missing_file() {
        let (issuer, store, _, owner, file) = setup().await;

        let err = issuer.issue(&owner, EntityId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        store.trash(owner.user_id, file.id).await.unwrap();
        let err = issuer.issue(&owner, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_only_the_owner_can_share() {
        let (issuer, _, _, owner, file) = setup().await;
        let stranger = ctx();

        let err = issuer.issue(&stranger, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let link = issuer.issue(&owner, file.id).await.unwrap();
        let err = issuer.revoke(&stranger, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(issuer.resolve(&link.token).await.unwrap().id, file.id);
    }
}
