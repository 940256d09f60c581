//! # vibemerge-core
//!
//! Domain layer for the reaction relay: the inbound reaction envelope, the PR
//! metadata attached to chat messages, the outbound command and cleanup
//! payloads, and the ports the dispatcher drives.
//! This crate has zero dependencies on infrastructure (Redis, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod serde_util;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    Authorization, CleanupRequest, CommandPayload, PrMetadata, ReactionEnvelope, ReactionEvent,
    ReactionItem,
};
pub use error::DomainError;
pub use serde_util::null_as_default;
pub use traits::{CleanupPublisher, MetadataSource, PortResult, WorkQueue};
