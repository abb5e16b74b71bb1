//! Content transport trait.
//!
//! The engine never touches bytes at rest itself. Uploads hand content to an
//! [`UploadTransport`], which stores it under an opaque key; the entity store
//! only records that key. A transport failure is always reported as
//! [`ErrorKind::Transport`](crate::error::ErrorKind::Transport) and is
//! terminal for the single item being transferred.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Moves file content to and from the backing store.
#[async_trait]
pub trait UploadTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Return the transport type name (e.g., "memory").
    fn transport_type(&self) -> &str;

    /// Store `data` under `key`, returning the number of bytes written.
    async fn put(&self, key: &str, data: Bytes) -> AppResult<u64>;

    /// Read back the content stored under `key`.
    async fn get(&self, key: &str) -> AppResult<Bytes>;

    /// Remove the content stored under `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
