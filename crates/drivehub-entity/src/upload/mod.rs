//! Upload pipeline value objects.

pub mod item;
pub mod report;

pub use item::{UploadEvent, UploadItem, UploadStatus};
pub use report::{BatchReport, ItemReport};
