//! Engine holding a validated baseline snapshot.
//!
//! The snapshot is validated once on construction; every `run*` call is a
//! stateless recompute against it. Nothing from a previous run is kept.

use std::sync::Arc;

use tariff_core::types::{GroupKey, PartRecord, Result, TariffOverrideMap};
use tracing::info;

use crate::aggregate::{aggregate, AggregatedResultRecord};
use crate::cost::landed_total_cost;
use crate::scenario::{
    evaluate_rows, find_divergence, recompute_baseline, BaselineDivergence, ScenarioResultRecord,
};
use crate::summary::{summarise, ScenarioSummary};
use crate::validate::validate_records;

/// Row count above which `run` switches to the rayon path.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Scenario cost engine over an immutable baseline table.
///
/// Cloning is cheap; clones share the baseline snapshot.
///
/// # Examples
///
/// ```rust
/// use tariff_core::types::{GroupKey, PartRecord, TariffOverrideMap};
/// use tariff_engine::ScenarioCostEngine;
///
/// let engine = ScenarioCostEngine::new(vec![
///     PartRecord::new("P1", "Bolt", "China")
///         .with_commodity("Steel")
///         .with_unit_cost(1.0)
///         .with_inventory_position(10.0)
///         .with_baseline_total_cost(10.0),
/// ])
/// .unwrap();
///
/// let overrides = TariffOverrideMap::new().with_rate("China", 100.0).unwrap();
/// let rows = engine.run(&overrides);
/// assert_eq!(rows[0].scenario_total_cost, 20.0);
///
/// let grouped = engine.run_grouped(&overrides, GroupKey::ByCommodity).unwrap();
/// assert_eq!(grouped[0].group_value, "Steel");
/// ```
#[derive(Clone, Debug)]
pub struct ScenarioCostEngine {
    baseline: Arc<[PartRecord]>,
}

impl ScenarioCostEngine {
    /// Validate `records` and take them as the baseline snapshot.
    pub fn new(records: Vec<PartRecord>) -> Result<Self> {
        validate_records(&records)?;
        info!("Baseline loaded: {} parts", records.len());
        Ok(Self {
            baseline: records.into(),
        })
    }

    /// Baseline records.
    pub fn records(&self) -> &[PartRecord] {
        &self.baseline
    }

    /// Number of baseline records.
    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    /// True if the baseline is empty.
    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }

    /// Distinct source countries in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for record in self.baseline.iter() {
            if !seen.contains(&record.source_country.as_str()) {
                seen.push(record.source_country.as_str());
            }
        }
        seen
    }

    /// Cost of each record at its own stored rate.
    pub fn baseline_cost(&self) -> Vec<f64> {
        recompute_baseline(&self.baseline)
    }

    /// Per-record scenario comparison.
    pub fn run(&self, overrides: &TariffOverrideMap) -> Vec<ScenarioResultRecord> {
        #[cfg(feature = "parallel")]
        {
            if self.baseline.len() >= PARALLEL_THRESHOLD {
                return crate::scenario::evaluate_rows_par(&self.baseline, overrides);
            }
        }
        evaluate_rows(&self.baseline, overrides)
    }

    /// Aggregated scenario comparison.
    pub fn run_grouped(
        &self,
        overrides: &TariffOverrideMap,
        group_key: GroupKey,
    ) -> Result<Vec<AggregatedResultRecord>> {
        aggregate(&self.run(overrides), group_key)
    }

    /// Portfolio totals under `overrides`.
    pub fn summary(&self, overrides: &TariffOverrideMap) -> ScenarioSummary {
        summarise(&self.run(overrides))
    }

    /// Portfolio scenario total only, skipping per-row output.
    pub fn scenario_total(&self, overrides: &TariffOverrideMap) -> f64 {
        self.baseline
            .iter()
            .map(|r| {
                landed_total_cost(
                    r,
                    overrides.effective_rate(&r.source_country, r.tariff_rate_pct),
                )
            })
            .sum()
    }

    /// Records whose supplied baseline disagrees with the cost model.
    pub fn divergence(&self, tolerance: f64) -> Vec<BaselineDivergence> {
        find_divergence(&self.baseline, tolerance)
    }
}
