//! `conversations.history` request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vibemerge_core::null_as_default;

/// Query parameters for `conversations.history`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryParams {
    pub channel: String,
    /// Only messages at or before this timestamp
    pub latest: String,
    pub limit: u32,
    pub inclusive: bool,
    pub include_all_metadata: bool,
}

impl HistoryParams {
    /// The single message at `ts`, with its metadata
    pub fn single(channel: impl Into<String>, ts: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            latest: ts.into(),
            limit: 1,
            inclusive: true,
            include_all_metadata: true,
        }
    }
}

/// `conversations.history` response body
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    pub ok: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<HistoryMessage>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A message entry from `conversations.history`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryMessage {
    pub ts: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub metadata: Option<MessageMetadata>,
}

/// Structured metadata attached to a message by the app that posted it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_type: String,
    #[serde(default)]
    pub event_payload: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_params() {
        let params = HistoryParams::single("C123", "1700000000.000100");
        assert_eq!(params.limit, 1);
        assert!(params.inclusive);
        assert!(params.include_all_metadata);
        assert_eq!(params.latest, "1700000000.000100");
    }

    #[test]
    fn test_response_with_metadata() {
        let body = r#"{
            "ok": true,
            "messages": [{
                "type": "message",
                "ts": "1700000000.000100",
                "text": "PR #42 opened",
                "metadata": {
                    "event_type": "github_pr",
                    "event_payload": {"pr_number": 42, "repository": "org/repo"}
                }
            }],
            "has_more": false
        }"#;

        let response: HistoryResponse = serde_json::from_str(body).unwrap();
        assert!(response.ok);
        let metadata = response.messages[0].metadata.as_ref().unwrap();
        assert_eq!(metadata.event_type, "github_pr");
        assert_eq!(metadata.event_payload["pr_number"], 42);
    }

    #[test]
    fn test_error_response() {
        let response: HistoryResponse =
            serde_json::from_str(r#"{"ok": false, "error": "not_in_channel"}"#).unwrap();
        assert!(!response.ok);
        assert!(response.messages.is_empty());
        assert_eq!(response.error.as_deref(), Some("not_in_channel"));
    }

    #[test]
    fn test_null_event_type_reads_as_empty() {
        let body = r#"{
            "ok": true,
            "messages": [{
                "ts": "1.0",
                "metadata": {"event_type": null, "event_payload": null}
            }]
        }"#;

        let response: HistoryResponse = serde_json::from_str(body).unwrap();
        let metadata = response.messages[0].metadata.as_ref().unwrap();
        assert_eq!(metadata.event_type, "");
        assert!(metadata.event_payload.is_null());
    }

    #[test]
    fn test_null_messages_reads_as_empty() {
        let response: HistoryResponse =
            serde_json::from_str(r#"{"ok": true, "messages": null}"#).unwrap();
        assert!(response.messages.is_empty());
    }
}
