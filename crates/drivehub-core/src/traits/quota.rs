//! Quota source trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::UserId;

/// Reports the total storage a user may consume.
///
/// Quota accounting itself lives outside the engine; DriveHub only combines
/// the reported total with the bytes held by active files.
#[async_trait]
pub trait QuotaSource: Send + Sync + std::fmt::Debug + 'static {
    /// Total bytes available to `user_id`.
    async fn total_bytes(&self, user_id: UserId) -> AppResult<u64>;
}
