//! # drivehub-core
//!
//! Core crate for DriveHub. Contains the unified error system, configuration
//! schemas, typed identifiers, domain events, and the traits implemented by
//! the collaborators the storage engine talks to (upload transport, quota
//! source).
//!
//! This crate has **no** internal dependencies on other DriveHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
