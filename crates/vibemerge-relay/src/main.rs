//! Vibemerge relay entry point
//!
//! Run with:
//! ```bash
//! SLACK_BOT_TOKEN=xoxb-... cargo run -p vibemerge-relay
//! ```
//!
//! Configuration is loaded from environment variables.

use tracing::{error, info, warn};
use vibemerge_common::{try_init_tracing, try_init_tracing_with_config, RelayConfig, TracingConfig};

#[tokio::main]
async fn main() {
    // Load configuration before anything touches Redis
    let loaded = match RelayConfig::from_env() {
        Ok(loaded) => loaded,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(&TracingConfig::from(&loaded.config.log)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    for warning in &loaded.warnings {
        warn!(key = warning.key, "{warning}");
    }

    let config = loaded.config;
    info!(
        redis = %config.redis.addr,
        channel = %config.relay.reaction_channel,
        emoji = %config.relay.target_emoji,
        queue = %config.relay.poppit_queue,
        "Configuration loaded"
    );

    if let Err(e) = vibemerge_relay::run(config).await {
        error!(error = %e, code = e.error_code(), "Relay stopped");
        std::process::exit(1);
    }
}
