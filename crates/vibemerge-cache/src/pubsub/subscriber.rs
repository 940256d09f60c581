//! Redis Pub/Sub subscriber.
//!
//! Opens a dedicated pub/sub connection on one channel and exposes the
//! messages as a stream. The stream ends when the connection drops; there is
//! no reconnect.

use futures_util::stream::{BoxStream, StreamExt};
use redis::aio::PubSub;

use crate::pool::RedisBus;

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Unreadable payload on {channel}: {source}")]
    Payload {
        channel: String,
        #[source]
        source: redis::RedisError,
    },
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// Received message from Pub/Sub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    /// Channel the message was received on
    pub channel: String,
    /// Raw payload
    pub payload: String,
}

impl ReceivedMessage {
    /// Create a new ReceivedMessage
    pub fn new(channel: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            payload: payload.into(),
        }
    }

    fn from_redis(msg: &redis::Msg) -> SubscriberResult<Self> {
        let channel = msg.get_channel_name().to_string();
        match msg.get_payload::<String>() {
            Ok(payload) => Ok(Self { channel, payload }),
            Err(source) => Err(SubscriberError::Payload { channel, source }),
        }
    }
}

/// Active subscription to a single channel
pub struct Subscription {
    channel: String,
    pubsub: PubSub,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl Subscription {
    /// Open a pub/sub connection and subscribe to `channel`
    pub async fn open(bus: &RedisBus, channel: &str) -> SubscriberResult<Self> {
        let mut pubsub = bus.client().get_async_pubsub().await?;
        pubsub.subscribe(channel).await?;

        tracing::info!(channel = %channel, "Subscribed to channel");

        Ok(Self {
            channel: channel.to_string(),
            pubsub,
        })
    }

    /// Consume the subscription as a message stream.
    ///
    /// Dropping the stream closes the pub/sub connection.
    pub fn into_stream(self) -> BoxStream<'static, SubscriberResult<ReceivedMessage>> {
        self.pubsub
            .into_on_message()
            .map(|msg| ReceivedMessage::from_redis(&msg))
            .boxed()
    }
}
