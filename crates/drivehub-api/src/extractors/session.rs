//! `Session` extractor: builds the explicit session context for a request.
//!
//! Authentication belongs to the transport in front of DriveHub; by the time
//! a request arrives here the caller's identity is carried in headers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use drivehub_core::types::{SessionId, UserId};
use drivehub_service::SessionContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the acting user's id.
pub const USER_HEADER: &str = "x-drivehub-user";
/// Header carrying the client session id. A fresh one is minted if absent.
pub const SESSION_HEADER: &str = "x-drivehub-session";

/// Session context available in handlers.
#[derive(Debug, Clone)]
pub struct Session(pub SessionContext);

impl std::ops::Deref for Session {
    type Target = SessionContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::validation(format!("Missing {USER_HEADER} header")))?
            .parse::<UserId>()
            .map_err(|_| ApiError::validation(format!("Invalid {USER_HEADER} header")))?;

        let session_id = match parts.headers.get(SESSION_HEADER) {
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|v| v.parse::<SessionId>().ok())
                .ok_or_else(|| ApiError::validation(format!("Invalid {SESSION_HEADER} header")))?,
            None => SessionId::new(),
        };

        Ok(Self(SessionContext::new(user_id, session_id)))
    }
}
