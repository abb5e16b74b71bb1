//! Session context passed explicitly into every engine call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivehub_core::types::{SessionId, UserId};

/// Who is acting, and from which session.
///
/// Produced by the transport/auth collaborator for each request. The engine
/// only reads it (for logging, event attribution, and quota lookup) and
/// never stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// The acting user.
    pub user_id: UserId,
    /// The client session.
    pub session_id: SessionId,
    /// When the call was received.
    pub request_time: DateTime<Utc>,
}

impl SessionContext {
    /// Creates a new session context stamped with the current time.
    pub fn new(user_id: UserId, session_id: SessionId) -> Self {
        Self {
            user_id,
            session_id,
            request_time: Utc::now(),
        }
    }
}
