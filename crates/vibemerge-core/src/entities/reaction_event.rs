//! Reaction event - the `reaction_added` envelope relayed from Slack

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::serde_util::null_as_default;

/// Outer Events API envelope as published on the reaction channel.
///
/// Only `event.reaction`, `event.item.channel` and `event.item.ts` drive the
/// pipeline. Every other field is carried so the envelope round-trips, and
/// unknown fields are ignored. Missing or `null` fields fall back to their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionEnvelope {
    #[serde(deserialize_with = "null_as_default")]
    pub token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub team_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub context_team_id: String,
    /// Opaque passthrough; Slack sends either `null` or a string here.
    pub context_enterprise_id: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub api_app_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event: ReactionEvent,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub envelope_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub authorizations: Vec<Authorization>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_ext_shared_channel: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub event_context: String,
}

/// The `event` object of a `reaction_added` callback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionEvent {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub event_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reaction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item: ReactionItem,
    #[serde(deserialize_with = "null_as_default")]
    pub item_user: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event_ts: String,
}

/// The item a reaction was added to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionItem {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub item_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub channel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ts: String,
}

/// App installation the event was delivered for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Authorization {
    /// Opaque passthrough, never inspected.
    pub enterprise_id: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub team_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_bot: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_enterprise_install: bool,
}

impl ReactionEnvelope {
    /// Decode a raw bus payload.
    ///
    /// Fails only when the body is not JSON or a known field has the wrong type.
    pub fn decode(payload: &str) -> Result<Self, DomainError> {
        serde_json::from_str(payload).map_err(DomainError::InvalidEvent)
    }
}

impl ReactionEvent {
    /// Exact, case-sensitive comparison against the configured emoji name
    #[inline]
    pub fn is_reaction(&self, name: &str) -> bool {
        self.reaction == name
    }

    /// Channel of the reacted message
    #[inline]
    pub fn channel(&self) -> &str {
        &self.item.channel
    }

    /// Timestamp of the reacted message
    #[inline]
    pub fn ts(&self) -> &str {
        &self.item.ts
    }
}
