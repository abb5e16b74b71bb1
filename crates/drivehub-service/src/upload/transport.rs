//! In-memory content transport.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use drivehub_core::error::AppError;
use drivehub_core::result::AppResult;
use drivehub_core::traits::UploadTransport;

/// Keeps uploaded content in a concurrent map keyed by storage key.
///
/// Used by the server binary and by tests; a networked backend would
/// implement [`UploadTransport`] the same way.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    objects: DashMap<String, Bytes>,
}

impl MemoryTransport {
    /// Creates an empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether content exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }
}

#[async_trait]
impl UploadTransport for MemoryTransport {
    fn transport_type(&self) -> &str {
        "memory"
    }

    async fn put(&self, key: &str, data: Bytes) -> AppResult<u64> {
        let written = data.len() as u64;
        self.objects.insert(key.to_string(), data);
        debug!(key, written, "Content stored");
        Ok(written)
    }

    async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.objects
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Content not found: {key}")))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.remove(key);
        Ok(())
    }
}
