//! Landed-cost formula.

use tariff_core::types::PartRecord;

/// Per-unit and total landed cost of a record at a given tariff rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandedCost {
    /// Tariff rate applied, in percent
    pub tariff_rate_pct: f64,
    /// Pre-tariff unit cost with tariff applied
    pub tariffed_unit_cost: f64,
    /// Tariffed unit cost plus warehousing and indirect cost
    pub full_unit_cost: f64,
    /// Full unit cost times inventory position
    pub total_cost: f64,
}

impl LandedCost {
    /// Evaluate the cost model for `record` at `rate_pct`.
    ///
    /// The result is affine and increasing in `rate_pct` whenever
    /// `unit_cost` and `inventory_position` are positive.
    #[inline]
    pub fn evaluate(record: &PartRecord, rate_pct: f64) -> Self {
        let tariffed_unit_cost = record.unit_cost * (1.0 + rate_pct / 100.0);
        let full_unit_cost =
            tariffed_unit_cost + record.warehouse_cost_per_unit + record.indirect_cost_per_unit;
        Self {
            tariff_rate_pct: rate_pct,
            tariffed_unit_cost,
            full_unit_cost,
            total_cost: full_unit_cost * record.inventory_position,
        }
    }
}

/// Total landed cost of `record` at `rate_pct`.
///
/// # Examples
/// ```
/// use tariff_core::types::PartRecord;
/// use tariff_engine::landed_total_cost;
///
/// let part = PartRecord::new("P1", "Widget", "China")
///     .with_unit_cost(10.0)
///     .with_inventory_position(2.0);
/// assert_eq!(landed_total_cost(&part, 25.0), 25.0);
/// ```
#[inline]
pub fn landed_total_cost(record: &PartRecord, rate_pct: f64) -> f64 {
    LandedCost::evaluate(record, rate_pct).total_cost
}
