//! Baseline part table rows.

use super::error::{EngineError, Result};
use super::rate::MAX_TARIFF_PCT;

/// One row of the baseline cost table.
///
/// `baseline_total_cost` is supplied by the loader and treated as ground
/// truth; the engine only ever recomputes the scenario cost.
///
/// # Examples
/// ```
/// use tariff_core::types::PartRecord;
///
/// let part = PartRecord::new("P-001", "Motor housing", "China")
///     .with_commodity("Steel")
///     .with_unit_cost(12.5)
///     .with_tariff_rate(20.0)
///     .with_inventory_position(100.0)
///     .with_baseline_total_cost(1550.0);
///
/// assert!(part.validate().is_ok());
/// assert_eq!(part.commodity.as_deref(), Some("Steel"));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartRecord {
    /// Unique key within the table
    pub part_id: String,
    /// Human readable part name
    pub description: String,
    /// Optional commodity grouping dimension
    #[cfg_attr(feature = "serde", serde(default))]
    pub commodity: Option<String>,
    /// Sourcing country
    pub source_country: String,
    /// Purchase + packaging + freight per unit, pre-tariff
    pub unit_cost: f64,
    /// Baseline tariff rate in percent, [0, 100]
    pub tariff_rate_pct: f64,
    /// Warehousing cost per unit
    pub warehouse_cost_per_unit: f64,
    /// Indirect cost per unit
    pub indirect_cost_per_unit: f64,
    /// Unit quantity multiplier
    pub inventory_position: f64,
    /// Precomputed total cost to serve
    pub baseline_total_cost: f64,
}

impl PartRecord {
    /// Create a record with all cost fields zeroed.
    pub fn new(
        part_id: impl Into<String>,
        description: impl Into<String>,
        source_country: impl Into<String>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            description: description.into(),
            commodity: None,
            source_country: source_country.into(),
            unit_cost: 0.0,
            tariff_rate_pct: 0.0,
            warehouse_cost_per_unit: 0.0,
            indirect_cost_per_unit: 0.0,
            inventory_position: 0.0,
            baseline_total_cost: 0.0,
        }
    }

    /// Set the commodity.
    pub fn with_commodity(mut self, commodity: impl Into<String>) -> Self {
        self.commodity = Some(commodity.into());
        self
    }

    /// Set the pre-tariff unit cost.
    pub fn with_unit_cost(mut self, unit_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    /// Set the baseline tariff rate (percent).
    pub fn with_tariff_rate(mut self, tariff_rate_pct: f64) -> Self {
        self.tariff_rate_pct = tariff_rate_pct;
        self
    }

    /// Set the warehousing cost per unit.
    pub fn with_warehouse_cost(mut self, cost: f64) -> Self {
        self.warehouse_cost_per_unit = cost;
        self
    }

    /// Set the indirect cost per unit.
    pub fn with_indirect_cost(mut self, cost: f64) -> Self {
        self.indirect_cost_per_unit = cost;
        self
    }

    /// Set the inventory position.
    pub fn with_inventory_position(mut self, units: f64) -> Self {
        self.inventory_position = units;
        self
    }

    /// Set the supplied baseline total cost.
    pub fn with_baseline_total_cost(mut self, total: f64) -> Self {
        self.baseline_total_cost = total;
        self
    }

    /// Check the row-level invariants.
    ///
    /// Table-level invariants (unique `part_id`) are checked by the engine.
    pub fn validate(&self) -> Result<()> {
        if self.part_id.trim().is_empty() {
            return Err(EngineError::invalid_input("part_id must not be empty"));
        }
        if self.source_country.trim().is_empty() {
            return Err(EngineError::invalid_input(format!(
                "part {}: source_country must not be empty",
                self.part_id
            )));
        }

        let fields = [
            ("unit_cost", self.unit_cost),
            ("tariff_rate_pct", self.tariff_rate_pct),
            ("warehouse_cost_per_unit", self.warehouse_cost_per_unit),
            ("indirect_cost_per_unit", self.indirect_cost_per_unit),
            ("inventory_position", self.inventory_position),
            ("baseline_total_cost", self.baseline_total_cost),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(EngineError::invalid_input(format!(
                    "part {}: {} is not a finite number",
                    self.part_id, name
                )));
            }
            if value < 0.0 {
                return Err(EngineError::invalid_input(format!(
                    "part {}: {} is negative ({})",
                    self.part_id, name, value
                )));
            }
        }

        if self.tariff_rate_pct > MAX_TARIFF_PCT {
            return Err(EngineError::invalid_input(format!(
                "part {}: tariff_rate_pct {} exceeds {}",
                self.part_id, self.tariff_rate_pct, MAX_TARIFF_PCT
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PartRecord {
        PartRecord::new("P-001", "Motor housing", "China")
            .with_unit_cost(12.5)
            .with_tariff_rate(20.0)
            .with_warehouse_cost(0.5)
            .with_indirect_cost(0.25)
            .with_inventory_position(100.0)
            .with_baseline_total_cost(1550.0)
    }

    #[test]
    fn test_new_zeroes_costs() {
        let part = PartRecord::new("P1", "Bolt", "Mexico");
        assert_eq!(part.unit_cost, 0.0);
        assert_eq!(part.baseline_total_cost, 0.0);
        assert!(part.commodity.is_none());
        assert!(part.validate().is_ok());
    }

    #[test]
    fn test_validate_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_part_id() {
        let mut part = sample();
        part.part_id = "  ".to_string();
        assert!(matches!(part.validate(), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_empty_country() {
        let mut part = sample();
        part.source_country = String::new();
        let err = part.validate().unwrap_err();
        assert!(err.to_string().contains("source_country"));
    }

    #[test]
    fn test_validate_negative_field() {
        let part = sample().with_warehouse_cost(-0.1);
        let err = part.validate().unwrap_err();
        assert!(err.to_string().contains("warehouse_cost_per_unit"));
    }

    #[test]
    fn test_validate_nan_field() {
        let part = sample().with_inventory_position(f64::NAN);
        let err = part.validate().unwrap_err();
        assert!(err.to_string().contains("inventory_position"));
    }

    #[test]
    fn test_validate_rate_above_hundred() {
        let part = sample().with_tariff_rate(100.5);
        let err = part.validate().unwrap_err();
        assert!(err.to_string().contains("tariff_rate_pct"));
    }

    #[test]
    fn test_validate_zero_baseline_is_fine() {
        let part = sample().with_baseline_total_cost(0.0);
        assert!(part.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_without_commodity() {
        let json = r#"{
            "part_id": "P9",
            "description": "Cable",
            "source_country": "Vietnam",
            "unit_cost": 1.0,
            "tariff_rate_pct": 10.0,
            "warehouse_cost_per_unit": 0.1,
            "indirect_cost_per_unit": 0.05,
            "inventory_position": 10.0,
            "baseline_total_cost": 12.5
        }"#;
        let part: PartRecord = serde_json::from_str(json).unwrap();
        assert!(part.commodity.is_none());
        assert_eq!(part.source_country, "Vietnam");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_missing_cost_field_fails() {
        let json = r#"{
            "part_id": "P9",
            "description": "Cable",
            "source_country": "Vietnam",
            "unit_cost": 1.0
        }"#;
        assert!(serde_json::from_str::<PartRecord>(json).is_err());
    }
}
