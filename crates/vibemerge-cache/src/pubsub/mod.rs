//! Redis Pub/Sub module.
//!
//! Provides the inbound subscription for reaction events.

mod subscriber;

pub use subscriber::{ReceivedMessage, Subscription, SubscriberError, SubscriberResult};
