//! Reaction dispatcher
//!
//! Receives reaction envelopes from the subscription one at a time and runs
//! each through decode, emoji filter, metadata lookup, enqueue and cleanup.
//! Nothing escapes a single message: failures are logged and the loop moves
//! on to the next one.

use std::fmt::Display;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use vibemerge_cache::ReceivedMessage;
use vibemerge_common::RelaySettings;
use vibemerge_core::{
    CleanupPublisher, CleanupRequest, CommandPayload, DomainError, MetadataSource, PrMetadata,
    ReactionEnvelope, WorkQueue,
};

/// Result of handling one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Reaction was not the target emoji
    Ignored { reaction: String },
    /// Reacted message carries no usable PR metadata
    NoMetadata,
    /// Merge commands were queued
    Queued {
        repository: String,
        pr_number: i64,
        cleanup_published: bool,
    },
}

/// Failure while handling one inbound message
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to decode reaction event: {0}")]
    Decode(#[source] DomainError),

    #[error("failed to get message metadata: {0}")]
    Fetch(#[source] DomainError),

    #[error("failed to push to {queue}: {source}")]
    Enqueue {
        queue: String,
        #[source]
        source: DomainError,
    },
}

impl DispatchError {
    /// Error code of the underlying domain error, for log fields
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(e) | Self::Fetch(e) | Self::Enqueue { source: e, .. } => e.code(),
        }
    }
}

/// Result of the read-only half of the pipeline
enum Lookup {
    /// Nothing to queue for this message
    Done(ProcessOutcome),
    /// Metadata found; ready to queue
    Merge {
        metadata: PrMetadata,
        channel: String,
        ts: String,
    },
}

/// Why the receive loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The shutdown token was cancelled
    Cancelled,
    /// The subscription stream ended on its own
    StreamEnded,
}

/// Drives the per-message pipeline against the relay's ports
#[derive(Clone)]
pub struct ReactionDispatcher {
    metadata: Arc<dyn MetadataSource>,
    queue: Arc<dyn WorkQueue>,
    cleanup: Arc<dyn CleanupPublisher>,
    settings: RelaySettings,
}

impl ReactionDispatcher {
    /// Create a new dispatcher
    pub fn new(
        metadata: Arc<dyn MetadataSource>,
        queue: Arc<dyn WorkQueue>,
        cleanup: Arc<dyn CleanupPublisher>,
        settings: RelaySettings,
    ) -> Self {
        Self {
            metadata,
            queue,
            cleanup,
            settings,
        }
    }

    /// Receive and handle messages until `shutdown` is cancelled or the
    /// stream ends.
    ///
    /// Cancellation is checked before every receive and aborts a metadata
    /// lookup that is still in flight. Once the enqueue has started, the
    /// message runs to completion so a queued item always gets its cleanup
    /// attempt. Receive errors are logged and skipped.
    pub async fn run<S, E>(&self, mut messages: S, shutdown: CancellationToken) -> LoopExit
    where
        S: Stream<Item = Result<ReceivedMessage, E>> + Unpin,
        E: Display,
    {
        loop {
            let next = tokio::select! {
                biased;
                () = shutdown.cancelled() => return LoopExit::Cancelled,
                next = messages.next() => next,
            };

            let message = match next {
                Some(Ok(message)) => message,
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Error receiving message");
                    continue;
                }
                None => {
                    tracing::warn!("Subscription stream ended");
                    return LoopExit::StreamEnded;
                }
            };

            let lookup = tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    tracing::info!(channel = %message.channel, "Shutdown requested, abandoning in-flight message");
                    return LoopExit::Cancelled;
                }
                lookup = self.lookup(&message.payload) => lookup,
            };

            let result = match lookup {
                Ok(Lookup::Done(outcome)) => Ok(outcome),
                Ok(Lookup::Merge { metadata, channel, ts }) => {
                    self.dispatch(metadata, &channel, &ts).await
                }
                Err(e) => Err(e),
            };

            if let Err(e) = result {
                tracing::error!(error = %e, code = e.code(), "Error handling reaction message");
            }
        }
    }

    /// Run one raw bus payload through the pipeline
    pub async fn handle_payload(&self, payload: &str) -> Result<ProcessOutcome, DispatchError> {
        match self.lookup(payload).await? {
            Lookup::Done(outcome) => Ok(outcome),
            Lookup::Merge { metadata, channel, ts } => {
                self.dispatch(metadata, &channel, &ts).await
            }
        }
    }

    /// Decode, filter and fetch metadata. Nothing is written to the bus here.
    async fn lookup(&self, payload: &str) -> Result<Lookup, DispatchError> {
        let envelope = ReactionEnvelope::decode(payload).map_err(DispatchError::Decode)?;
        let event = &envelope.event;
        let settings = &self.settings;

        if !event.is_reaction(&settings.target_emoji) {
            tracing::debug!(reaction = %event.reaction, "Ignoring reaction");
            return Ok(Lookup::Done(ProcessOutcome::Ignored {
                reaction: event.reaction.clone(),
            }));
        }

        let (channel, ts) = (event.channel(), event.ts());
        tracing::info!(
            emoji = %settings.target_emoji,
            channel = %channel,
            ts = %ts,
            "Processing reaction"
        );

        let Some(metadata) = self
            .metadata
            .fetch_metadata(channel, ts)
            .await
            .map_err(DispatchError::Fetch)?
        else {
            tracing::debug!(channel = %channel, ts = %ts, "No PR metadata found in message, ignoring");
            return Ok(Lookup::Done(ProcessOutcome::NoMetadata));
        };

        tracing::info!(
            repository = %metadata.repository,
            pr_number = metadata.pr_number,
            "Found PR metadata"
        );

        Ok(Lookup::Merge {
            metadata,
            channel: channel.to_string(),
            ts: ts.to_string(),
        })
    }

    /// Queue the merge commands, then schedule the message cleanup
    async fn dispatch(
        &self,
        metadata: PrMetadata,
        channel: &str,
        ts: &str,
    ) -> Result<ProcessOutcome, DispatchError> {
        let settings = &self.settings;

        let command = CommandPayload::merge(&metadata, &settings.target_branch, &settings.work_dir);
        self.queue
            .enqueue(&settings.poppit_queue, &command)
            .await
            .map_err(|source| DispatchError::Enqueue {
                queue: settings.poppit_queue.clone(),
                source,
            })?;

        tracing::info!(
            repository = %metadata.repository,
            pr_number = metadata.pr_number,
            queue = %settings.poppit_queue,
            "Queued merge command"
        );

        let cleanup_published = self.schedule_cleanup(channel, ts).await;

        Ok(ProcessOutcome::Queued {
            repository: metadata.repository,
            pr_number: metadata.pr_number,
            cleanup_published,
        })
    }

    /// Ask TimeBomb to delete the message. Failure only warns: the merge
    /// command is already queued.
    async fn schedule_cleanup(&self, channel: &str, ts: &str) -> bool {
        let settings = &self.settings;
        let request = CleanupRequest::new(channel, ts, settings.timebomb_ttl);

        match self
            .cleanup
            .publish_cleanup(&settings.timebomb_channel, &request)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    ttl = settings.timebomb_ttl,
                    channel = %channel,
                    ts = %ts,
                    "Scheduled message cleanup"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    timebomb_channel = %settings.timebomb_channel,
                    "Failed to set TTL on message"
                );
                false
            }
        }
    }
}
