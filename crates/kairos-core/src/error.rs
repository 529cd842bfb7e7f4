use std::time::Duration;

use thiserror::Error;

/// Core error type for KAIROS operations.
#[derive(Error, Debug)]
pub enum KairosError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Membership error: {0}")]
    Membership(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for KairosError {
    fn from(e: serde_json::Error) -> Self {
        KairosError::Deserialization(e.to_string())
    }
}

impl From<toml::ser::Error> for KairosError {
    fn from(e: toml::ser::Error) -> Self {
        KairosError::Serialization(e.to_string())
    }
}

/// Result type alias using KairosError.
pub type Result<T> = std::result::Result<T, KairosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KairosError::Store("connection refused".to_string());
        assert_eq!(err.to_string(), "Store error: connection refused");

        let err = KairosError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Timeout after 5s");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: KairosError = json_err.into();
        assert!(matches!(err, KairosError::Deserialization(_)));
    }
}
