//! Application error types
//!
//! Errors that stop the relay. Per-message failures never reach this type.

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    // Redis errors
    #[error("Cache error: {0}")]
    Cache(String),

    // External service errors
    #[error("External service error: {0}")]
    ExternalService(String),

    // The inbound subscription ended without a shutdown request
    #[error("Subscription closed: {0}")]
    SubscriptionClosed(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    /// Get error code for log fields
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::SubscriptionClosed(_) => "SUBSCRIPTION_CLOSED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
