//! HTTP request handlers, one module per resource.

pub mod entry;
pub mod file;
pub mod folder;
pub mod health;
pub mod listing;
pub mod share;
pub mod storage;
pub mod upload;
