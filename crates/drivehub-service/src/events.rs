//! In-process domain event bus.

use tokio::sync::broadcast;
use tracing::trace;

use drivehub_core::events::{DomainEvent, EventPayload};

use crate::context::SessionContext;

/// Fan-out of committed domain events to any number of observers.
///
/// Publishing never blocks; observers that fall behind by more than the
/// buffer size miss the oldest events and should re-read projections.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Creates a bus retaining up to `capacity` undelivered events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Publish an event attributed to the caller of `ctx`.
    pub fn publish(&self, ctx: &SessionContext, payload: impl Into<EventPayload>) {
        let event = DomainEvent::new(ctx.user_id, payload.into());
        if self.sender.send(event).is_err() {
            trace!("No event subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
