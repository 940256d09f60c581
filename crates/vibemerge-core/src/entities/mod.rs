//! Domain entities - inbound events and outbound payloads

mod cleanup_request;
mod command_payload;
mod pr_metadata;
mod reaction_event;

pub use cleanup_request::CleanupRequest;
pub use command_payload::CommandPayload;
pub use pr_metadata::PrMetadata;
pub use reaction_event::{Authorization, ReactionEnvelope, ReactionEvent, ReactionItem};
