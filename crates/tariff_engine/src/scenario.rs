//! Per-record scenario computation.
//!
//! Row-wise map from baseline records to [`ScenarioResultRecord`]s. Output
//! order and count always match the input.

use tariff_core::traits::CostDelta;
use tariff_core::types::{PartRecord, Result, TariffOverrideMap};
use tracing::{debug, warn};

use crate::cost::{landed_total_cost, LandedCost};
use crate::validate::validate_records;

/// One row of a scenario comparison table.
///
/// Derived and ephemeral: produced fresh on every scenario invocation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioResultRecord {
    /// Part identifier
    pub part_id: String,
    /// Part description
    pub description: String,
    /// Commodity, when the baseline carries one
    pub commodity: Option<String>,
    /// Sourcing country
    pub source_country: String,
    /// Rate stored on the baseline record
    pub baseline_tariff_rate_pct: f64,
    /// Rate after applying overrides
    pub scenario_tariff_rate_pct: f64,
    /// Unit quantity
    pub inventory_position: f64,
    /// Supplied baseline total cost
    pub baseline_total_cost: f64,
    /// Recomputed total cost under the scenario rate
    pub scenario_total_cost: f64,
    /// `scenario_total_cost - baseline_total_cost`
    pub delta_amount: f64,
    /// `delta_amount / baseline_total_cost` as a fraction, 0 for a zero baseline
    pub delta_pct: f64,
}

impl ScenarioResultRecord {
    /// Evaluate one record under `overrides`.
    pub fn evaluate(record: &PartRecord, overrides: &TariffOverrideMap) -> Self {
        let rate = overrides.effective_rate(&record.source_country, record.tariff_rate_pct);
        let scenario_total_cost = LandedCost::evaluate(record, rate).total_cost;
        let delta_amount = scenario_total_cost - record.baseline_total_cost;
        let delta_pct = if record.baseline_total_cost == 0.0 {
            0.0
        } else {
            delta_amount / record.baseline_total_cost
        };

        Self {
            part_id: record.part_id.clone(),
            description: record.description.clone(),
            commodity: record.commodity.clone(),
            source_country: record.source_country.clone(),
            baseline_tariff_rate_pct: record.tariff_rate_pct,
            scenario_tariff_rate_pct: rate,
            inventory_position: record.inventory_position,
            baseline_total_cost: record.baseline_total_cost,
            scenario_total_cost,
            delta_amount,
            delta_pct,
        }
    }

    /// True if the scenario raises cost.
    pub fn is_increase(&self) -> bool {
        self.delta_amount > 0.0
    }

    /// True if the scenario rate differs from the stored rate.
    pub fn is_overridden(&self) -> bool {
        self.scenario_tariff_rate_pct != self.baseline_tariff_rate_pct
    }
}

impl CostDelta for ScenarioResultRecord {
    fn label(&self) -> &str {
        &self.part_id
    }

    fn source_country(&self) -> &str {
        &self.source_country
    }

    fn baseline_total_cost(&self) -> f64 {
        self.baseline_total_cost
    }

    fn scenario_total_cost(&self) -> f64 {
        self.scenario_total_cost
    }

    fn inventory_position(&self) -> f64 {
        self.inventory_position
    }

    fn delta_amount(&self) -> f64 {
        self.delta_amount
    }

    fn delta_pct(&self) -> f64 {
        self.delta_pct
    }
}

/// Apply `overrides` to `records` and compare against the supplied baseline.
///
/// Validates the whole table first; an empty table yields an empty result.
/// Pure and deterministic: identical inputs give bit-identical output.
///
/// # Errors
///
/// - `InvalidInput` for a malformed record
/// - `DuplicatePart` for a repeated `part_id`
pub fn compute_scenario(
    records: &[PartRecord],
    overrides: &TariffOverrideMap,
) -> Result<Vec<ScenarioResultRecord>> {
    validate_records(records)?;
    let results = evaluate_rows(records, overrides);
    debug!(
        "Scenario computed: {} records, {} overrides",
        results.len(),
        overrides.len()
    );
    Ok(results)
}

/// Rayon version of [`compute_scenario`].
///
/// Rows are independent, so the output is identical to the serial path.
#[cfg(feature = "parallel")]
pub fn compute_scenario_par(
    records: &[PartRecord],
    overrides: &TariffOverrideMap,
) -> Result<Vec<ScenarioResultRecord>> {
    validate_records(records)?;
    let results = evaluate_rows_par(records, overrides);
    debug!(
        "Scenario computed in parallel: {} records, {} overrides",
        results.len(),
        overrides.len()
    );
    Ok(results)
}

/// Row map over records that have already been validated.
pub(crate) fn evaluate_rows(
    records: &[PartRecord],
    overrides: &TariffOverrideMap,
) -> Vec<ScenarioResultRecord> {
    records
        .iter()
        .map(|r| ScenarioResultRecord::evaluate(r, overrides))
        .collect()
}

/// Rayon row map over records that have already been validated.
#[cfg(feature = "parallel")]
pub(crate) fn evaluate_rows_par(
    records: &[PartRecord],
    overrides: &TariffOverrideMap,
) -> Vec<ScenarioResultRecord> {
    use rayon::prelude::*;

    records
        .par_iter()
        .map(|r| ScenarioResultRecord::evaluate(r, overrides))
        .collect()
}

/// Total cost of each record recomputed at its own stored tariff rate.
///
/// This is the identity scenario's cost column and is always available,
/// independent of any override.
pub fn baseline_cost(records: &[PartRecord]) -> Result<Vec<f64>> {
    validate_records(records)?;
    Ok(recompute_baseline(records))
}

pub(crate) fn recompute_baseline(records: &[PartRecord]) -> Vec<f64> {
    records
        .iter()
        .map(|r| landed_total_cost(r, r.tariff_rate_pct))
        .collect()
}

/// Record whose supplied baseline disagrees with the cost model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineDivergence {
    /// Part identifier
    pub part_id: String,
    /// `baseline_total_cost` as supplied by the loader
    pub supplied: f64,
    /// Cost recomputed at the stored tariff rate
    pub recomputed: f64,
    /// `recomputed - supplied`
    pub gap: f64,
}

/// Records whose supplied baseline differs from the recomputed one.
///
/// A record is flagged when `|recomputed - supplied| > tolerance * max(supplied, 1)`.
/// Divergence means the upstream baseline used a different formula; it is a
/// data-quality signal, not an engine failure.
pub fn baseline_divergence(
    records: &[PartRecord],
    tolerance: f64,
) -> Result<Vec<BaselineDivergence>> {
    validate_records(records)?;
    Ok(find_divergence(records, tolerance))
}

/// Divergence scan over records that have already been validated.
pub(crate) fn find_divergence(records: &[PartRecord], tolerance: f64) -> Vec<BaselineDivergence> {
    let flagged: Vec<_> = records
        .iter()
        .zip(recompute_baseline(records))
        .filter_map(|(record, recomputed)| {
            let gap = recomputed - record.baseline_total_cost;
            (gap.abs() > tolerance * record.baseline_total_cost.max(1.0)).then(|| {
                BaselineDivergence {
                    part_id: record.part_id.clone(),
                    supplied: record.baseline_total_cost,
                    recomputed,
                    gap,
                }
            })
        })
        .collect();

    if !flagged.is_empty() {
        warn!(
            "{} of {} baseline records diverge from the cost model (tolerance {})",
            flagged.len(),
            records.len(),
            tolerance
        );
    }
    flagged
}
