//! Command payload - unit of work pushed to the Poppit queue

use serde::{Deserialize, Serialize};

use crate::entities::PrMetadata;
use crate::error::DomainError;

/// Commands for the Poppit executor to run in `dir`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPayload {
    pub repo: String,
    pub branch: String,
    #[serde(rename = "type")]
    pub action_type: String,
    pub dir: String,
    pub commands: Vec<String>,
}

impl CommandPayload {
    /// Mark the PR ready, then squash-merge it.
    ///
    /// `branch` is the configured target branch, not the PR's own branch.
    pub fn merge(metadata: &PrMetadata, branch: &str, dir: &str) -> Self {
        let repo = &metadata.repository;
        let number = metadata.pr_number;

        Self {
            repo: repo.clone(),
            branch: branch.to_string(),
            action_type: metadata.event_action.clone(),
            dir: dir.to_string(),
            commands: vec![
                format!("gh pr --repo {repo} ready {number}"),
                format!("gh pr --repo {repo} merge {number} --squash"),
            ],
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(DomainError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> PrMetadata {
        PrMetadata {
            pr_number: 42,
            repository: "org/repo".to_string(),
            pr_url: "https://github.com/org/repo/pull/42".to_string(),
            author: "octocat".to_string(),
            branch: "feature/x".to_string(),
            event_action: "opened".to_string(),
        }
    }

    #[test]
    fn test_merge_commands() {
        let payload = CommandPayload::merge(&metadata(), "refs/heads/main", "/tmp/vibemerge");

        assert_eq!(payload.repo, "org/repo");
        assert_eq!(payload.branch, "refs/heads/main");
        assert_eq!(payload.action_type, "opened");
        assert_eq!(payload.dir, "/tmp/vibemerge");
        assert_eq!(
            payload.commands,
            vec![
                "gh pr --repo org/repo ready 42".to_string(),
                "gh pr --repo org/repo merge 42 --squash".to_string(),
            ]
        );
    }

    #[test]
    fn test_branch_comes_from_config_not_metadata() {
        let payload = CommandPayload::merge(&metadata(), "refs/heads/release", "/work");
        assert_eq!(payload.branch, "refs/heads/release");
    }

    #[test]
    fn test_wire_format() {
        let payload = CommandPayload::merge(&metadata(), "refs/heads/main", "/tmp/vibemerge");
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"repo":"org/repo","branch":"refs/heads/main","type":"opened","dir":"/tmp/vibemerge","commands":["gh pr --repo org/repo ready 42","gh pr --repo org/repo merge 42 --squash"]}"#
        );
    }
}
