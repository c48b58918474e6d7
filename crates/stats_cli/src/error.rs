//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;
use stats_core::analytical::AnalyticalError;

/// Errors surfaced by `normstat` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pricing error: {0}")]
    Analytical(#[from] AnalyticalError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} self-check(s) failed")]
    SelfCheckFailed(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialisation error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
