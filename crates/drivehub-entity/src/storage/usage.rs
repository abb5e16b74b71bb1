//! Storage usage summary value object.

use serde::{Deserialize, Serialize};

/// Used / total / percentage summary for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageUsage {
    /// Total quota in bytes.
    pub total_bytes: u64,
    /// Bytes held by active files.
    pub used_bytes: u64,
    /// Remaining bytes, never negative.
    pub available_bytes: u64,
    /// Usage percentage (0.0 - 100.0, may exceed 100 when over quota).
    pub usage_percent: f64,
}

impl StorageUsage {
    /// Create a summary from total and used values.
    pub fn new(total_bytes: u64, used_bytes: u64) -> Self {
        let usage_percent = if total_bytes == 0 {
            0.0
        } else {
            (used_bytes as f64 / total_bytes as f64) * 100.0
        };

        Self {
            total_bytes,
            used_bytes,
            available_bytes: total_bytes.saturating_sub(used_bytes),
            usage_percent,
        }
    }

    /// Check if the quota is exceeded.
    pub fn is_exceeded(&self) -> bool {
        self.used_bytes >= self.total_bytes
    }

    /// Check if `additional_bytes` more still fit in the quota.
    pub fn has_space_for(&self, additional_bytes: u64) -> bool {
        self.used_bytes.saturating_add(additional_bytes) <= self.total_bytes
    }
}
