//! Relay configuration structs
//!
//! Loads configuration from environment variables (and an optional `.env` file).

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::telemetry::{LogFormat, LogLevel};

/// Main relay configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub slack: SlackConfig,
    pub redis: RedisConfig,
    pub relay: RelaySettings,
    pub log: LogConfig,
}

/// Slack Web API access
#[derive(Clone)]
pub struct SlackConfig {
    pub bot_token: String,
    pub api_url: String,
}

impl fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Redis connection settings
#[derive(Clone)]
pub struct RedisConfig {
    /// `host:port`
    pub addr: String,
    pub password: Option<String>,
    pub db: i64,
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("addr", &self.addr)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("db", &self.db)
            .finish()
    }
}

/// Pipeline settings: what to react to and where to send the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    /// Inbound pub/sub channel carrying `reaction_added` envelopes
    pub reaction_channel: String,
    pub work_dir: String,
    pub target_emoji: String,
    pub target_branch: String,
    /// List the Poppit executor pops commands from
    pub poppit_queue: String,
    /// Pub/sub channel TimeBomb listens on
    pub timebomb_channel: String,
    pub timebomb_ttl: u64,
}

/// Logging settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// A setting that could not be parsed and fell back to its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: &'static str,
    pub value: String,
    pub default: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid integer value for {}: {}, using default: {}",
            self.key, self.value, self.default
        )
    }
}

/// Configuration together with the warnings produced while loading it.
///
/// Warnings are returned rather than logged because the tracing subscriber
/// depends on the configuration and does not exist yet.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RelayConfig,
    pub warnings: Vec<ConfigWarning>,
}

// Default value functions
fn default_slack_api_url() -> String {
    "https://slack.com/api".to_string()
}

fn default_redis_addr() -> String {
    "localhost:6379".to_string()
}

fn default_reaction_channel() -> String {
    "slack-relay-reaction-added".to_string()
}

fn default_work_dir() -> String {
    "/tmp/vibemerge".to_string()
}

fn default_target_emoji() -> String {
    "heart_eyes_cat".to_string()
}

fn default_target_branch() -> String {
    "refs/heads/main".to_string()
}

fn default_poppit_queue() -> String {
    "poppit-commands".to_string()
}

fn default_timebomb_channel() -> String {
    "timebomb-messages".to_string()
}

fn default_timebomb_ttl() -> u64 {
    86400 // 24 hours
}

impl RelayConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `SLACK_BOT_TOKEN` is missing
    pub fn from_env() -> Result<LoadedConfig, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<LoadedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut warnings = Vec::new();

        let bot_token = get("SLACK_BOT_TOKEN").ok_or(ConfigError::MissingVar("SLACK_BOT_TOKEN"))?;

        let config = Self {
            slack: SlackConfig {
                bot_token,
                api_url: get("SLACK_API_URL").unwrap_or_else(default_slack_api_url),
            },
            redis: RedisConfig {
                addr: get("REDIS_ADDR").unwrap_or_else(default_redis_addr),
                password: get("REDIS_PASSWORD"),
                db: parse_or_default(get("REDIS_DB"), "REDIS_DB", 0, &mut warnings),
            },
            relay: RelaySettings {
                reaction_channel: get("REACTION_CHANNEL").unwrap_or_else(default_reaction_channel),
                work_dir: get("WORK_DIR").unwrap_or_else(default_work_dir),
                target_emoji: get("TARGET_EMOJI").unwrap_or_else(default_target_emoji),
                target_branch: get("TARGET_BRANCH").unwrap_or_else(default_target_branch),
                poppit_queue: get("POPPIT_QUEUE").unwrap_or_else(default_poppit_queue),
                timebomb_channel: get("TIMEBOMB_CHANNEL").unwrap_or_else(default_timebomb_channel),
                timebomb_ttl: parse_or_default(
                    get("TIMEBOMB_TTL"),
                    "TIMEBOMB_TTL",
                    default_timebomb_ttl(),
                    &mut warnings,
                ),
            },
            log: LogConfig {
                level: get("LOG_LEVEL")
                    .map(|s| LogLevel::parse(&s))
                    .unwrap_or_default(),
                format: get("LOG_FORMAT")
                    .map(|s| LogFormat::parse(&s))
                    .unwrap_or_default(),
            },
        };

        Ok(LoadedConfig { config, warnings })
    }
}

fn parse_or_default<T>(
    value: Option<String>,
    key: &'static str,
    default: T,
    warnings: &mut Vec<ConfigWarning>,
) -> T
where
    T: FromStr + fmt::Display,
{
    let Some(value) = value else {
        return default;
    };

    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warnings.push(ConfigWarning {
                key,
                value,
                default: default.to_string(),
            });
            default
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<LoadedConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RelayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("SLACK_BOT_TOKEN")));
        assert_eq!(err.to_string(), "SLACK_BOT_TOKEN environment variable is required");
    }

    #[test]
    fn test_empty_token_is_fatal() {
        let err = load(&[("SLACK_BOT_TOKEN", "")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("SLACK_BOT_TOKEN")));
    }

    #[test]
    fn test_default_values() {
        let loaded = load(&[("SLACK_BOT_TOKEN", "xoxb-test")]).unwrap();
        let config = loaded.config;

        assert!(loaded.warnings.is_empty());
        assert_eq!(config.slack.bot_token, "xoxb-test");
        assert_eq!(config.slack.api_url, "https://slack.com/api");
        assert_eq!(config.redis.addr, "localhost:6379");
        assert_eq!(config.redis.password, None);
        assert_eq!(config.redis.db, 0);
        assert_eq!(config.relay.reaction_channel, "slack-relay-reaction-added");
        assert_eq!(config.relay.work_dir, "/tmp/vibemerge");
        assert_eq!(config.relay.target_emoji, "heart_eyes_cat");
        assert_eq!(config.relay.target_branch, "refs/heads/main");
        assert_eq!(config.relay.poppit_queue, "poppit-commands");
        assert_eq!(config.relay.timebomb_channel, "timebomb-messages");
        assert_eq!(config.relay.timebomb_ttl, 86400);
        assert_eq!(config.log.level, LogLevel::Info);
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let loaded = load(&[
            ("SLACK_BOT_TOKEN", "xoxb-test"),
            ("REDIS_ADDR", "redis.internal:6380"),
            ("REDIS_PASSWORD", "hunter2"),
            ("REDIS_DB", "3"),
            ("TARGET_EMOJI", "shipit"),
            ("TIMEBOMB_TTL", "60"),
            ("LOG_LEVEL", "DEBUG"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        let config = loaded.config;

        assert_eq!(config.redis.addr, "redis.internal:6380");
        assert_eq!(config.redis.password.as_deref(), Some("hunter2"));
        assert_eq!(config.redis.db, 3);
        assert_eq!(config.relay.target_emoji, "shipit");
        assert_eq!(config.relay.timebomb_ttl, 60);
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_value_uses_default() {
        let loaded = load(&[("SLACK_BOT_TOKEN", "xoxb-test"), ("WORK_DIR", "")]).unwrap();
        assert_eq!(loaded.config.relay.work_dir, "/tmp/vibemerge");
    }

    #[test]
    fn test_invalid_integer_falls_back_with_warning() {
        let loaded = load(&[
            ("SLACK_BOT_TOKEN", "xoxb-test"),
            ("TIMEBOMB_TTL", "a day"),
        ])
        .unwrap();

        assert_eq!(loaded.config.relay.timebomb_ttl, 86400);
        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(
            loaded.warnings[0].to_string(),
            "invalid integer value for TIMEBOMB_TTL: a day, using default: 86400"
        );
    }

    #[test]
    fn test_negative_ttl_is_rejected() {
        let loaded = load(&[("SLACK_BOT_TOKEN", "xoxb-test"), ("TIMEBOMB_TTL", "-5")]).unwrap();
        assert_eq!(loaded.config.relay.timebomb_ttl, 86400);
        assert_eq!(loaded.warnings[0].key, "TIMEBOMB_TTL");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let loaded = load(&[
            ("SLACK_BOT_TOKEN", "xoxb-secret"),
            ("REDIS_PASSWORD", "hunter2"),
        ])
        .unwrap();
        let debug = format!("{:?}", loaded.config);
        assert!(!debug.contains("xoxb-secret"));
        assert!(!debug.contains("hunter2"));
    }
}
