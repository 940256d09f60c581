//! Relay lifecycle
//!
//! Connects to Redis and Slack, opens the reaction subscription, and runs the
//! dispatcher on its own task until a termination signal arrives.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vibemerge_cache::{Publisher, RedisBus, Subscription};
use vibemerge_common::{AppError, AppResult, RelayConfig};
use vibemerge_slack::SlackClient;

use crate::dispatcher::{LoopExit, ReactionDispatcher};
use crate::signal::shutdown_signal;

/// Connect to Redis and verify it answers PING
pub async fn connect_bus(config: &RelayConfig) -> AppResult<RedisBus> {
    tracing::info!("Connecting to Redis...");
    let bus = RedisBus::connect(&config.redis)
        .await
        .map_err(|e| AppError::Cache(format!("Failed to connect to Redis: {e}")))?;
    bus.health_check()
        .await
        .map_err(|e| AppError::Cache(format!("Failed to connect to Redis: {e}")))?;
    tracing::info!("Connected to Redis successfully");
    Ok(bus)
}

/// Build the dispatcher over the live Redis and Slack clients
pub fn create_dispatcher(config: &RelayConfig, bus: &RedisBus) -> AppResult<ReactionDispatcher> {
    let slack = SlackClient::new(&config.slack)
        .map_err(|e| AppError::ExternalService(format!("Failed to build Slack client: {e}")))?;
    let publisher = Arc::new(Publisher::new(bus.connection()));

    Ok(ReactionDispatcher::new(
        Arc::new(slack),
        publisher.clone(),
        publisher,
        config.relay.clone(),
    ))
}

/// Run the relay until SIGINT/SIGTERM.
///
/// Returns an error if startup fails or if the subscription ends without a
/// shutdown request.
pub async fn run(config: RelayConfig) -> AppResult<()> {
    let bus = connect_bus(&config).await?;
    let dispatcher = create_dispatcher(&config, &bus)?;

    let channel = config.relay.reaction_channel.clone();
    let subscription = Subscription::open(&bus, &channel)
        .await
        .map_err(|e| AppError::Cache(format!("Failed to subscribe to {channel}: {e}")))?;

    let shutdown = CancellationToken::new();
    let mut task = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { dispatcher.run(subscription.into_stream(), shutdown).await }
    });

    let exit = tokio::select! {
        () = shutdown_signal() => {
            tracing::info!("Shutdown signal received, exiting...");
            shutdown.cancel();
            task.await.map_err(AppError::internal)?
        }
        result = &mut task => result.map_err(AppError::internal)?,
    };

    drop(bus);
    tracing::info!("Redis connection closed");

    match exit {
        LoopExit::Cancelled => Ok(()),
        LoopExit::StreamEnded => Err(AppError::SubscriptionClosed(channel)),
    }
}
