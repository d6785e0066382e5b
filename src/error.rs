//! Error types for the runner core
//!
//! Errors only surface at setup time. Steady-state ticking never fails.

use thiserror::Error;

/// The main error type for runner setup
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for runner operations
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}
