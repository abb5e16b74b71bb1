//! Storage usage reporting and quota checks.

pub mod usage;

pub use usage::{FixedQuota, StorageService};
