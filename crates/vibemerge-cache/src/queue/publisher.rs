//! Redis publisher for relay output.
//!
//! Command payloads go to the tail of the Poppit list (producer/consumer
//! queue); cleanup requests are published on the TimeBomb channel.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use vibemerge_core::{CleanupPublisher, CleanupRequest, CommandPayload, PortResult, WorkQueue};

use crate::pool::RedisResult;

/// Redis publisher
#[derive(Clone)]
pub struct Publisher {
    conn: ConnectionManager,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Append a raw message to the tail of a list, returning the new length
    pub async fn push_raw(&self, list: &str, message: &str) -> RedisResult<u64> {
        let mut conn = self.conn.clone();
        let length: u64 = conn.rpush(list, message).await?;

        tracing::debug!(list = %list, length = length, "Pushed message");

        Ok(length)
    }

    /// Publish a raw message to a channel, returning the receiver count
    pub async fn publish_raw(&self, channel: &str, message: &str) -> RedisResult<u32> {
        let mut conn = self.conn.clone();
        let receivers: u32 = conn.publish(channel, message).await?;

        tracing::debug!(channel = %channel, receivers = receivers, "Published raw message");

        Ok(receivers)
    }
}

#[async_trait]
impl WorkQueue for Publisher {
    async fn enqueue(&self, queue: &str, payload: &CommandPayload) -> PortResult<()> {
        let json = payload.to_json()?;
        self.push_raw(queue, &json).await?;
        Ok(())
    }
}

#[async_trait]
impl CleanupPublisher for Publisher {
    async fn publish_cleanup(&self, channel: &str, request: &CleanupRequest) -> PortResult<()> {
        let json = request.to_json()?;
        self.publish_raw(channel, &json).await?;
        Ok(())
    }
}
