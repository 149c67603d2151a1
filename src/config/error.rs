//! Configuration error types.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors raised while loading or validating application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read roster file '{path}': {reason}")]
    RosterFile { path: String, reason: String },
}
