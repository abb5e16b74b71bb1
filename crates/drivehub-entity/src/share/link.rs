//! Share link value object.

use serde::{Deserialize, Serialize};

use drivehub_core::types::EntityId;

/// A fully-qualified share reference handed out to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// The shared file.
    pub file_id: EntityId,
    /// The opaque share token.
    pub token: String,
    /// The public URL for accessing the share.
    pub url: String,
}

impl ShareLink {
    /// Build a link for `token` under `base_url`.
    pub fn new(file_id: EntityId, token: String, base_url: &str) -> Self {
        let url = format!("{}/api/shared/{}", base_url.trim_end_matches('/'), token);
        Self {
            file_id,
            token,
            url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let link = ShareLink::new(EntityId::new(), "abc".into(), "https://drive.example/");
        assert_eq!(link.url, "https://drive.example/api/shared/abc");
    }
}
