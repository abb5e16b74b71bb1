//! Application state shared across all handlers.

use std::sync::Arc;

use drivehub_core::config::AppConfig;
use drivehub_service::{
    EntryService, EventBus, HierarchyProjector, LifecycleManager, ShareIssuer, StorageService,
    UploadOrchestrator,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Every field is a
/// cheap handle onto the same entity store.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Domain event bus
    pub events: EventBus,
    /// Folder creation, lookup, rename/move, download
    pub entries: EntryService,
    /// Read projections
    pub projector: HierarchyProjector,
    /// Trash / restore / purge
    pub lifecycle: LifecycleManager,
    /// Share links
    pub shares: ShareIssuer,
    /// Batch uploads
    pub uploads: UploadOrchestrator,
    /// Usage and quota
    pub storage: StorageService,
}
