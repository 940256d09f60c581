//! # vibemerge-common
//!
//! Shared utilities including configuration, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    ConfigError, ConfigWarning, LoadedConfig, LogConfig, RedisConfig, RelayConfig, RelaySettings,
    SlackConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, LogFormat, LogLevel, TracingConfig,
    TracingError,
};
