//! Error types for the Tributary pipeline.
//!
//! This module defines a unified error enum covering every error category in
//! the application: configuration, I/O, source connectors, the answer cache,
//! LLM generation, and serialization.

use thiserror::Error;

/// Unified error type for the Tributary pipeline.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// Errors are represented and propagated, never panicked on.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source connector errors (non-fatal to the pipeline)
    #[error("Connector error: {0}")]
    Connector(String),

    /// Answer cache errors (non-fatal to the pipeline)
    #[error("Cache error: {0}")]
    Cache(String),

    /// LLM generation errors (fatal to the request)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Connector("users source unreachable".to_string());
        assert_eq!(err.to_string(), "Connector error: users source unreachable");

        let err = AppError::Cache("timeout".to_string());
        assert_eq!(err.to_string(), "Cache error: timeout");
    }

    #[test]
    fn test_serde_json_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
