//! Lifecycle state machine shared by files and folders.
//!
//! ```text
//! Active --trash--> Trashed --restore--> Active
//!                   Trashed --purge----> (removed)
//! ```
//!
//! Any other combination is rejected with `InvalidState`. Cascades are not
//! modelled here; the entity store applies them to each descendant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_core::error::AppError;

/// Lifecycle state of a stored entry. Purged entries are absent from the
/// store, so they have no state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Normal, visible.
    Active,
    /// Soft-deleted, recoverable.
    Trashed,
}

/// An event driving a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Move to the trash.
    Trash,
    /// Bring back from the trash.
    Restore,
    /// Remove permanently.
    Purge,
}

/// Outcome of a legal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The entry becomes `Trashed`.
    ToTrashed,
    /// The entry becomes `Active`.
    ToActive,
    /// The entry is removed from the store.
    ToPurged,
}

impl Lifecycle {
    /// Derive the state from a `trashed_at` timestamp.
    pub fn from_trashed_at(trashed_at: Option<DateTime<Utc>>) -> Self {
        if trashed_at.is_some() {
            Self::Trashed
        } else {
            Self::Active
        }
    }

    /// Validate `event` against the current state.
    pub fn apply(self, event: LifecycleEvent) -> Result<Transition, AppError> {
        match (self, event) {
            (Self::Active, LifecycleEvent::Trash) => Ok(Transition::ToTrashed),
            (Self::Trashed, LifecycleEvent::Restore) => Ok(Transition::ToActive),
            (Self::Trashed, LifecycleEvent::Purge) => Ok(Transition::ToPurged),
            (Self::Trashed, LifecycleEvent::Trash) => {
                Err(AppError::invalid_state("Entry is already in the trash"))
            }
            (Self::Active, LifecycleEvent::Restore) => {
                Err(AppError::invalid_state("Entry is not in the trash"))
            }
            (Self::Active, LifecycleEvent::Purge) => Err(AppError::invalid_state(
                "Entry must be trashed before it can be purged",
            )),
        }
    }
}
