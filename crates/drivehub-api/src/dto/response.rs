//! Response DTOs.

use serde::{Deserialize, Serialize};

use drivehub_core::types::EntityId;
use drivehub_service::store::PurgeOutcome;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a permanent delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeResponse {
    /// Removed entries, the purged one first.
    pub removed: Vec<EntityId>,
    /// Active descendants moved to root.
    pub promoted: Vec<EntityId>,
}

impl From<PurgeOutcome> for PurgeResponse {
    fn from(outcome: PurgeOutcome) -> Self {
        Self {
            removed: outcome.removed_ids(),
            promoted: outcome.promoted,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}
