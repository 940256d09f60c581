//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Decoding Errors
    // =========================================================================
    #[error("Invalid reaction event: {0}")]
    InvalidEvent(#[source] serde_json::Error),

    #[error("Invalid PR metadata: {0}")]
    InvalidMetadata(#[source] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("No message found at timestamp {0}")]
    MessageNotFound(String),

    #[error("Platform error: {0}")]
    PlatformError(String),

    #[error("Bus error: {0}")]
    BusError(String),
}

impl DomainError {
    /// Get an error code string for log fields
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEvent(_) => "INVALID_EVENT",
            Self::InvalidMetadata(_) => "INVALID_METADATA",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::PlatformError(_) => "PLATFORM_ERROR",
            Self::BusError(_) => "BUS_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::MessageNotFound("1.2".into()).code(), "UNKNOWN_MESSAGE");
        assert_eq!(DomainError::BusError("down".into()).code(), "BUS_ERROR");
    }

    #[test]
    fn test_display() {
        let err = DomainError::MessageNotFound("1700000000.000100".into());
        assert_eq!(err.to_string(), "No message found at timestamp 1700000000.000100");
    }
}
