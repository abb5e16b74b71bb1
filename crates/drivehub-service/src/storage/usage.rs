//! Used / total storage summary backed by a quota collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use drivehub_core::error::AppError;
use drivehub_core::result::AppResult;
use drivehub_core::traits::QuotaSource;
use drivehub_core::types::UserId;
use drivehub_entity::storage::StorageUsage;

use crate::context::SessionContext;
use crate::store::EntityStore;

/// Quota source that grants every user the same configured total.
#[derive(Debug, Clone)]
pub struct FixedQuota {
    total_bytes: u64,
}

impl FixedQuota {
    /// Creates a quota of `total_bytes` per user.
    pub fn new(total_bytes: u64) -> Self {
        Self { total_bytes }
    }
}

#[async_trait]
impl QuotaSource for FixedQuota {
    async fn total_bytes(&self, _user_id: UserId) -> AppResult<u64> {
        Ok(self.total_bytes)
    }
}

/// Combines bytes held by active files with the user's quota.
#[derive(Debug, Clone)]
pub struct StorageService {
    /// Entity store handle.
    store: EntityStore,
    /// Quota collaborator.
    quota: Arc<dyn QuotaSource>,
}

impl StorageService {
    /// Creates a new storage service.
    pub fn new(store: EntityStore, quota: Arc<dyn QuotaSource>) -> Self {
        Self { store, quota }
    }

    /// Current usage summary for the caller.
    ///
    /// Only the caller's own active files are counted; trashed files still
    /// occupy their bytes until purged but are not charged here.
    pub async fn usage(&self, ctx: &SessionContext) -> AppResult<StorageUsage> {
        let total = self.quota.total_bytes(ctx.user_id).await?;
        let used: u64 = self
            .store
            .snapshot()
            .await
            .files_of(ctx.user_id)
            .filter(|f| !f.is_trashed())
            .map(|f| u64::try_from(f.size_bytes).unwrap_or(0))
            .sum();

        debug!(user_id = %ctx.user_id, used, total, "Storage usage computed");
        Ok(StorageUsage::new(total, used))
    }

    /// Fails with a validation error if `additional_bytes` would exceed quota.
    pub async fn ensure_space(&self, ctx: &SessionContext, additional_bytes: u64) -> AppResult<()> {
        let usage = self.usage(ctx).await?;
        if !usage.has_space_for(additional_bytes) {
            return Err(AppError::validation(format!(
                "Storage quota exceeded: {additional_bytes} bytes requested, {} available",
                usage.available_bytes
            )));
        }
        Ok(())
    }
}
