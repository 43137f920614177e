//! Error types for the ragtool workspace.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! engine and serialization failures.

use thiserror::Error;

/// Unified error type for ragtool.
///
/// Adapters never wrap engine errors: whatever variant the engine returns
/// reaches the caller unchanged.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// RAG engine errors (loading, retrieval, embedding provider)
    #[error("Engine error: {0}")]
    Engine(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
