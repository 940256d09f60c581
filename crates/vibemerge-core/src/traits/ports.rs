//! Ports - the external collaborators of the dispatch pipeline
//!
//! The domain layer defines what it needs; `vibemerge-slack` and
//! `vibemerge-cache` provide the implementations.

use async_trait::async_trait;

use crate::entities::{CleanupRequest, CommandPayload, PrMetadata};
use crate::error::DomainError;

/// Result type for port operations
pub type PortResult<T> = Result<T, DomainError>;

// ============================================================================
// Chat platform
// ============================================================================

#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Look up the message at (or just before) `ts` in `channel` and return
    /// its PR metadata, if it carries any usable metadata.
    ///
    /// A failed call, an empty history, or an undecodable payload is an error.
    async fn fetch_metadata(&self, channel: &str, ts: &str) -> PortResult<Option<PrMetadata>>;
}

// ============================================================================
// Message bus
// ============================================================================

#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Append a command payload to the tail of `queue`
    async fn enqueue(&self, queue: &str, payload: &CommandPayload) -> PortResult<()>;
}

#[async_trait]
pub trait CleanupPublisher: Send + Sync {
    /// Publish a cleanup request on `channel`
    async fn publish_cleanup(&self, channel: &str, request: &CleanupRequest) -> PortResult<()>;
}
