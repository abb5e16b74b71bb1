//! Storage limits and projection configuration.

use serde::{Deserialize, Serialize};

/// Upload limits, quota, and listing bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Maximum size of a single uploaded item in bytes (default 5 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Total quota reported by the fixed quota source (default 1 GB).
    #[serde(default = "default_total_quota")]
    pub total_quota_bytes: u64,
    /// Default bound for the recent-files projection.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_upload_size_bytes: default_max_upload(),
            total_quota_bytes: default_total_quota(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_max_upload() -> u64 {
    5_368_709_120 // 5 GB
}

fn default_total_quota() -> u64 {
    1_073_741_824 // 1 GB
}

fn default_recent_limit() -> usize {
    50
}
