//! File domain entities.

pub mod mime;
pub mod model;

pub use mime::{DEFAULT_MIME_TYPE, mime_from_name};
pub use model::{CreateFile, File};
