//! PR metadata - structured payload attached to a Slack message

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::serde_util::null_as_default;

/// Pull request described by a message's `metadata.event_payload`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrMetadata {
    #[serde(deserialize_with = "null_as_default")]
    pub pr_number: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub repository: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pr_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event_action: String,
}

impl PrMetadata {
    /// Interpret the metadata block of a fetched message.
    ///
    /// Returns `Ok(None)` when the message carries no metadata (empty event
    /// type or null payload) or when the payload lacks a PR number or
    /// repository. A payload whose fields have the wrong types is an error.
    pub fn from_message_metadata(
        event_type: &str,
        event_payload: &Value,
    ) -> Result<Option<Self>, DomainError> {
        if event_type.is_empty() || event_payload.is_null() {
            return Ok(None);
        }

        let metadata: Self = serde_json::from_value(event_payload.clone())
            .map_err(DomainError::InvalidMetadata)?;

        Ok(metadata.is_actionable().then_some(metadata))
    }

    /// Both the PR number and the repository must be set
    #[inline]
    pub fn is_actionable(&self) -> bool {
        self.pr_number != 0 && !self.repository.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_metadata() {
        let payload = json!({
            "pr_number": 42,
            "repository": "org/repo",
            "pr_url": "https://github.com/org/repo/pull/42",
            "author": "octocat",
            "branch": "feature/x",
            "event_action": "opened"
        });

        let metadata = PrMetadata::from_message_metadata("github_pr", &payload)
            .unwrap()
            .unwrap();
        assert_eq!(metadata.pr_number, 42);
        assert_eq!(metadata.repository, "org/repo");
        assert_eq!(metadata.branch, "feature/x");
        assert_eq!(metadata.event_action, "opened");
    }

    #[test]
    fn test_no_event_type_means_no_metadata() {
        let payload = json!({"pr_number": 42, "repository": "org/repo"});
        assert_eq!(PrMetadata::from_message_metadata("", &payload).unwrap(), None);
    }

    #[test]
    fn test_null_payload_means_no_metadata() {
        assert_eq!(
            PrMetadata::from_message_metadata("github_pr", &Value::Null).unwrap(),
            None
        );
    }

    #[test]
    fn test_missing_pr_number() {
        let payload = json!({"repository": "org/repo"});
        assert_eq!(PrMetadata::from_message_metadata("github_pr", &payload).unwrap(), None);
    }

    #[test]
    fn test_zero_pr_number() {
        let payload = json!({"pr_number": 0, "repository": "org/repo"});
        assert_eq!(PrMetadata::from_message_metadata("github_pr", &payload).unwrap(), None);
    }

    #[test]
    fn test_missing_repository() {
        let payload = json!({"pr_number": 7});
        assert_eq!(PrMetadata::from_message_metadata("github_pr", &payload).unwrap(), None);
    }

    #[test]
    fn test_wrong_types_are_an_error() {
        let payload = json!({"pr_number": "forty-two", "repository": "org/repo"});
        let err = PrMetadata::from_message_metadata("github_pr", &payload).unwrap_err();
        assert!(matches!(err, DomainError::InvalidMetadata(_)));
    }

    #[test]
    fn test_unrelated_payload_shape_is_an_error() {
        let payload = json!(["not", "an", "object"]);
        let err = PrMetadata::from_message_metadata("github_pr", &payload).unwrap_err();
        assert!(matches!(err, DomainError::InvalidMetadata(_)));
    }

    #[test]
    fn test_null_optional_fields_still_actionable() {
        let payload = json!({
            "pr_number": 42,
            "repository": "org/repo",
            "pr_url": null,
            "author": null,
            "branch": null,
            "event_action": null
        });

        let metadata = PrMetadata::from_message_metadata("github_pr", &payload)
            .unwrap()
            .unwrap();
        assert_eq!(metadata.pr_number, 42);
        assert_eq!(metadata.repository, "org/repo");
        assert_eq!(metadata.author, "");
        assert_eq!(metadata.event_action, "");
    }

    #[test]
    fn test_null_required_fields_mean_no_metadata() {
        let payload = json!({"pr_number": null, "repository": "org/repo"});
        assert_eq!(PrMetadata::from_message_metadata("github_pr", &payload).unwrap(), None);

        let payload = json!({"pr_number": 42, "repository": null});
        assert_eq!(PrMetadata::from_message_metadata("github_pr", &payload).unwrap(), None);
    }
}
