//! The entity store and its snapshot type.

pub mod entity_store;
pub mod state;

pub use entity_store::{EntityStore, PurgeOutcome, TrashOutcome};
pub use state::{Descendants, StoreState};
