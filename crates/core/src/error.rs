//! Error types for promptsync.
//!
//! This module defines a unified error enum that covers every error category
//! in the tool: configuration, I/O, registry, prompt store, validation and
//! serialization errors.

use thiserror::Error;

/// Unified error type for promptsync.
///
/// All fallible functions return `Result<T, AppError>`.
/// We never panic on bad input; errors are represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (including missing credentials)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Prompt registry errors
    #[error("Hub error: {0}")]
    Hub(String),

    /// Prompt store errors (missing file, wrong shape)
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Prompt records that failed structural or convention checks
    #[error("Validation error: {0}")]
    Validation(String),

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

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
