//! # drivehub-entity
//!
//! Domain entity models for DriveHub: the File and Folder records owned by
//! the entity store, the [`Entry`](entry::Entry) sum type used wherever the
//! two are handled together, the shared lifecycle state machine, and the
//! value objects exchanged with the upload pipeline.

pub mod entry;
pub mod file;
pub mod folder;
pub mod lifecycle;
pub mod share;
pub mod storage;
pub mod upload;

pub use entry::{Entry, EntryKind, EntryPatch};
pub use file::{CreateFile, File};
pub use folder::{CreateFolder, Folder};
pub use lifecycle::{Lifecycle, LifecycleEvent};
