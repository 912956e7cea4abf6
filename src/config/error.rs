//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Consistency threshold must be positive")]
    InvalidConsistencyThreshold,

    #[error("Tolerance '{0}' must be positive and finite")]
    InvalidTolerance(&'static str),

    #[error("Default core weight must be between 0 and 1")]
    InvalidCoreWeight,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
