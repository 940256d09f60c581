//! Configuration structs

mod relay_config;

pub use relay_config::{
    ConfigError, ConfigWarning, LoadedConfig, LogConfig, RedisConfig, RelayConfig, RelaySettings,
    SlackConfig,
};
