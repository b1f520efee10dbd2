//! Simulation error types.

use tariff_core::types::EngineError;
use thiserror::Error;

/// Errors from history construction, simulation and cost distributions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Simulation parameters out of range.
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    /// Country not present in the tariff history.
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// Malformed historical series.
    #[error("Invalid tariff history: {0}")]
    InvalidHistory(String),

    /// Statistics requested over no samples.
    #[error("Sample is empty")]
    EmptySample,

    /// Error raised by the scenario engine.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_country() {
        let err = SimulationError::UnknownCountry("Atlantis".to_string());
        assert_eq!(format!("{}", err), "Unknown country: Atlantis");
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err: SimulationError = EngineError::DuplicatePart("P1".to_string()).into();
        assert_eq!(format!("{}", err), "Duplicate part ID: P1");
    }
}
