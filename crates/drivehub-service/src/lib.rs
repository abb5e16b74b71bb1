//! # drivehub-service
//!
//! The hierarchical storage lifecycle engine. Each service holds an
//! [`EntityStore`] handle (the sole owner of file and folder records) and
//! re-reads current state on every call instead of caching entries.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` or cheaply cloneable handles. Every public
//! operation takes an explicit [`SessionContext`]; the engine keeps no
//! identity state of its own.

pub mod context;
pub mod entry;
pub mod events;
pub mod lifecycle;
pub mod projection;
pub mod share;
pub mod storage;
pub mod store;
pub mod upload;

pub use context::SessionContext;
pub use entry::EntryService;
pub use events::EventBus;
pub use lifecycle::LifecycleManager;
pub use projection::HierarchyProjector;
pub use share::{ShareIssuer, TokenGenerator};
pub use storage::{FixedQuota, StorageService};
pub use store::EntityStore;
pub use upload::{MemoryTransport, UploadOrchestrator};
