//! Folder creation, entry lookup, rename/move, and content download.

pub mod service;

pub use service::EntryService;
