//! Domain events emitted by DriveHub operations.
//!
//! Events are published on the service-level event bus after a mutation has
//! been committed to the entity store. Observers use them as refresh
//! triggers; they never carry mutable entity state.

pub mod entry;
pub mod share;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use entry::EntryEvent;
pub use share::ShareEvent;

use crate::types::UserId;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event.
    pub actor_id: UserId,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A file or folder changed.
    Entry(EntryEvent),
    /// A share link changed.
    Share(ShareEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: UserId, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}

impl From<EntryEvent> for EventPayload {
    fn from(event: EntryEvent) -> Self {
        Self::Entry(event)
    }
}

impl From<ShareEvent> for EventPayload {
    fn from(event: ShareEvent) -> Self {
        Self::Share(event)
    }
}
