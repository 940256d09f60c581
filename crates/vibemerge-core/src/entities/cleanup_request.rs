//! Cleanup request - asks TimeBomb to delete a message after a TTL

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Deferred deletion of a Slack message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupRequest {
    pub channel: String,
    pub ts: String,
    /// Seconds until deletion
    pub ttl: u64,
}

impl CleanupRequest {
    /// Create a new CleanupRequest
    pub fn new(channel: impl Into<String>, ts: impl Into<String>, ttl: u64) -> Self {
        Self {
            channel: channel.into(),
            ts: ts.into(),
            ttl,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(DomainError::Serialization)
    }
}
