//! Read-only hierarchy views derived from an entity store snapshot.

pub mod projector;
pub mod views;

pub use projector::HierarchyProjector;
pub use views::{Breadcrumb, FolderContents, FolderPath, RootListing};
