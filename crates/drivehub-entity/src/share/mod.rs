//! Share domain entities.

pub mod link;

pub use link::ShareLink;
