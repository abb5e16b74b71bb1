//! Soft-delete state machine: trash, restore, purge.

pub mod manager;

pub use manager::LifecycleManager;
