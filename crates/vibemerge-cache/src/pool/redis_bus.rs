//! Redis connection built from relay settings.
//!
//! Holds one `redis::Client` and one multiplexed `ConnectionManager`. The
//! relay has a single consumer task, so there is no pool.

use redis::aio::ConnectionManager;
use redis::{Client, ConnectionInfo, IntoConnectionInfo};
use vibemerge_common::RedisConfig;
use vibemerge_core::DomainError;

/// Error type for Redis bus operations
#[derive(Debug, thiserror::Error)]
pub enum RedisBusError {
    #[error("Invalid Redis address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: redis::RedisError,
    },

    #[error("Redis command error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Unexpected PING reply: {0}")]
    UnexpectedPong(String),
}

/// Result type for Redis bus operations
pub type RedisResult<T> = Result<T, RedisBusError>;

impl From<RedisBusError> for DomainError {
    fn from(err: RedisBusError) -> Self {
        DomainError::BusError(err.to_string())
    }
}

/// Build connection info from `host:port`, password and database index
pub fn connection_info(config: &RedisConfig) -> RedisResult<ConnectionInfo> {
    let url = format!("redis://{}/{}", config.addr, config.db);
    let mut info = url
        .into_connection_info()
        .map_err(|source| RedisBusError::InvalidAddress {
            addr: config.addr.clone(),
            source,
        })?;
    info.redis.password.clone_from(&config.password);
    Ok(info)
}

/// Shared Redis handle
#[derive(Clone)]
pub struct RedisBus {
    client: Client,
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBus")
            .field("addr", &self.client.get_connection_info().addr)
            .finish_non_exhaustive()
    }
}

impl RedisBus {
    /// Open the client and establish the command connection
    pub async fn connect(config: &RedisConfig) -> RedisResult<Self> {
        let client = Client::open(connection_info(config)?)?;
        let conn = ConnectionManager::new(client.clone()).await?;

        tracing::info!(addr = %config.addr, db = config.db, "Redis connection established");

        Ok(Self { client, conn })
    }

    /// Client used to open dedicated pub/sub connections
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Handle to the shared command connection
    pub fn connection(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Check connectivity by pinging Redis
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.connection();
        let reply = redis::cmd("PING").query_async::<String>(&mut conn).await?;
        if reply != "PONG" {
            return Err(RedisBusError::UnexpectedPong(reply));
        }
        Ok(())
    }
}
