//! CLI error types.

use tariff_core::types::EngineError;
use tariff_sim::SimulationError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Part table could not be read or written as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Part table or output could not be handled as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Scenario engine rejected the input
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// History or simulation error
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl CliError {
    /// Create an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
