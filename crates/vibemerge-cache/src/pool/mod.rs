//! Redis connection module.
//!
//! Provides the shared connection used for commands and the client used to
//! open the pub/sub subscription.

mod redis_bus;

pub use redis_bus::{connection_info, RedisBus, RedisBusError, RedisResult};
