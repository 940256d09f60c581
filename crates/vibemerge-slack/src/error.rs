//! Slack client errors

use vibemerge_core::DomainError;

/// Error type for Slack API calls
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(
        "Rate limited by Slack{}",
        .retry_after.map_or_else(String::new, |secs| format!(", retry after {secs}s"))
    )]
    RateLimited { retry_after: Option<u64> },

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Slack API error: {0}")]
    Api(String),
}

/// Result type for Slack API calls
pub type SlackResult<T> = Result<T, SlackError>;

impl From<SlackError> for DomainError {
    fn from(err: SlackError) -> Self {
        DomainError::PlatformError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SlackError::Api("channel_not_found".into()).to_string(),
            "Slack API error: channel_not_found"
        );
        assert_eq!(
            SlackError::RateLimited { retry_after: Some(30) }.to_string(),
            "Rate limited by Slack, retry after 30s"
        );
        assert_eq!(
            SlackError::RateLimited { retry_after: None }.to_string(),
            "Rate limited by Slack"
        );
    }

    #[test]
    fn test_into_domain_error() {
        let err: DomainError = SlackError::Status(502).into();
        assert!(matches!(err, DomainError::PlatformError(ref msg) if msg == "Unexpected HTTP status 502"));
    }
}
