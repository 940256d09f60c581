//! Slack Web API client
//!
//! Bearer-token client over `reqwest`. Nothing is retried here; a failed
//! call surfaces to the dispatcher, which drops the event.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use vibemerge_common::SlackConfig;
use vibemerge_core::{DomainError, MetadataSource, PortResult, PrMetadata};

use crate::error::{SlackError, SlackResult};
use crate::history::{HistoryMessage, HistoryParams, HistoryResponse};

/// Request timeout for Slack API calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Slack Web API client
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a client from relay configuration
    pub fn new(config: &SlackConfig) -> SlackResult<Self> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_http_client(http, config))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(http: reqwest::Client, config: &SlackConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.bot_token.clone(),
        }
    }

    /// Call `conversations.history`
    pub async fn conversation_history(
        &self,
        params: &HistoryParams,
    ) -> SlackResult<Vec<HistoryMessage>> {
        let url = format!("{}/conversations.history", self.api_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            return Err(SlackError::RateLimited { retry_after });
        }
        if !status.is_success() {
            return Err(SlackError::Status(status.as_u16()));
        }

        let body: HistoryResponse = response.json().await?;
        if !body.ok {
            return Err(SlackError::Api(
                body.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        tracing::debug!(
            channel = %params.channel,
            latest = %params.latest,
            messages = body.messages.len(),
            "Fetched conversation history"
        );

        Ok(body.messages)
    }
}

#[async_trait]
impl MetadataSource for SlackClient {
    async fn fetch_metadata(&self, channel: &str, ts: &str) -> PortResult<Option<PrMetadata>> {
        let messages = self
            .conversation_history(&HistoryParams::single(channel, ts))
            .await?;

        let Some(message) = messages.into_iter().next() else {
            return Err(DomainError::MessageNotFound(ts.to_string()));
        };

        match message.metadata {
            Some(metadata) => {
                PrMetadata::from_message_metadata(&metadata.event_type, &metadata.event_payload)
            }
            None => Ok(None),
        }
    }
}
