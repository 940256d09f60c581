//! # vibemerge-cache
//!
//! Redis bus layer for the reaction relay.
//!
//! ## Features
//!
//! - **Connection**: A single managed connection built from relay settings
//! - **Work Queue**: `RPUSH` of command payloads onto the Poppit list
//! - **Pub/Sub**: Cleanup requests published to TimeBomb, and the inbound
//!   reaction subscription
//!
//! ## Example
//!
//! ```ignore
//! use vibemerge_cache::{Publisher, RedisBus, Subscription};
//!
//! let bus = RedisBus::connect(&config.redis).await?;
//! bus.health_check().await?;
//!
//! let publisher = Publisher::new(bus.connection());
//! let subscription = Subscription::open(&bus, "slack-relay-reaction-added").await?;
//! let mut messages = subscription.into_stream();
//! ```

pub mod pool;
pub mod pubsub;
pub mod queue;

// Re-export pool types
pub use pool::{connection_info, RedisBus, RedisBusError, RedisResult};

// Re-export pubsub types
pub use pubsub::{ReceivedMessage, Subscription, SubscriberError, SubscriberResult};

// Re-export queue types
pub use queue::Publisher;
