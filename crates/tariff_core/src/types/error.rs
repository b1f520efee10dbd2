//! Error types for scenario costing.
//!
//! All validation happens at the engine boundary, before any row is
//! processed, so a failed call never yields partial results.

use thiserror::Error;

/// Errors raised by record validation, override construction and grouping.
///
/// A zero `baseline_total_cost` is not an error; its `delta_pct` is zero.
///
/// # Examples
/// ```
/// use tariff_core::types::EngineError;
///
/// let err = EngineError::UnknownGroupKey("supplier".to_string());
/// assert_eq!(format!("{}", err), "Unknown group key: supplier");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Malformed record (empty identifier, negative or non-finite field).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The same `part_id` appears more than once in the table.
    #[error("Duplicate part ID: {0}")]
    DuplicatePart(String),

    /// Tariff rate outside [0, 100] percent.
    #[error("Invalid tariff rate: {0} (must be within [0, 100])")]
    InvalidRate(f64),

    /// Tariff override outside [0, 100] percent.
    #[error("Invalid tariff rate for {country}: {rate} (must be within [0, 100])")]
    InvalidTariffRate {
        /// Source country the rate was supplied for
        country: String,
        /// Offending rate in percent
        rate: f64,
    },

    /// Grouping key not among the recognised set.
    #[error("Unknown group key: {0}")]
    UnknownGroupKey(String),

    /// The grouping column has no value for a row.
    #[error("Part {part_id} has no value for group key '{key}'")]
    MissingGroupValue {
        /// Row lacking the grouping value
        part_id: String,
        /// Name of the grouping key
        key: String,
    },
}

impl EngineError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_input() {
        let err = EngineError::invalid_input("part P1: unit_cost is negative");
        assert_eq!(
            format!("{}", err),
            "Invalid input: part P1: unit_cost is negative"
        );
    }

    #[test]
    fn test_error_display_duplicate_part() {
        let err = EngineError::DuplicatePart("P-100".to_string());
        assert_eq!(format!("{}", err), "Duplicate part ID: P-100");
    }

    #[test]
    fn test_error_display_invalid_tariff_rate() {
        let err = EngineError::InvalidTariffRate {
            country: "China".to_string(),
            rate: 120.0,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid tariff rate for China: 120 (must be within [0, 100])"
        );
    }

    #[test]
    fn test_error_display_invalid_rate() {
        let err = EngineError::InvalidRate(120.0);
        assert_eq!(
            format!("{}", err),
            "Invalid tariff rate: 120 (must be within [0, 100])"
        );
    }

    #[test]
    fn test_error_display_missing_group_value() {
        let err = EngineError::MissingGroupValue {
            part_id: "P7".to_string(),
            key: "commodity".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Part P7 has no value for group key 'commodity'"
        );
    }

    #[test]
    fn test_error_is_error_trait() {
        let err: Box<dyn std::error::Error> =
            Box::new(EngineError::UnknownGroupKey("bogus".to_string()));
        assert!(err.to_string().contains("bogus"));
    }
}
