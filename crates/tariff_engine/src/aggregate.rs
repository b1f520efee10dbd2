//! Aggregation of scenario results by `(group value, source country)`.
//!
//! Costs are summed first and deltas recomputed from the sums. Averaging
//! per-record deltas would bias groups of different sizes.

use std::collections::HashMap;

use tariff_core::traits::CostDelta;
use tariff_core::types::{EngineError, GroupKey, Result};
use tracing::debug;

use crate::scenario::ScenarioResultRecord;

/// One aggregated row of a scenario comparison.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedResultRecord {
    /// Key the rows were grouped by
    pub group_key: GroupKey,
    /// Value of the grouping column
    pub group_value: String,
    /// Secondary grouping dimension
    pub source_country: String,
    /// Number of underlying records
    pub part_count: usize,
    /// Summed inventory position
    pub inventory_position: f64,
    /// Summed baseline total cost
    pub baseline_total_cost: f64,
    /// Summed scenario total cost
    pub scenario_total_cost: f64,
    /// Recomputed from the summed totals
    pub delta_amount: f64,
    /// Recomputed from the summed totals, 0 for a zero baseline
    pub delta_pct: f64,
    /// Display only
    pub mean_baseline_tariff_rate_pct: f64,
    /// Display only
    pub mean_scenario_tariff_rate_pct: f64,
}

impl CostDelta for AggregatedResultRecord {
    fn label(&self) -> &str {
        &self.group_value
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

#[derive(Default)]
struct Accumulator {
    part_count: usize,
    inventory_position: f64,
    baseline_total_cost: f64,
    scenario_total_cost: f64,
    baseline_rate_sum: f64,
    scenario_rate_sum: f64,
}

impl Accumulator {
    fn add(&mut self, row: &ScenarioResultRecord) {
        self.part_count += 1;
        self.inventory_position += row.inventory_position;
        self.baseline_total_cost += row.baseline_total_cost;
        self.scenario_total_cost += row.scenario_total_cost;
        self.baseline_rate_sum += row.baseline_tariff_rate_pct;
        self.scenario_rate_sum += row.scenario_tariff_rate_pct;
    }

    fn finish(
        self,
        group_key: GroupKey,
        group_value: String,
        source_country: String,
    ) -> AggregatedResultRecord {
        let delta_amount = self.scenario_total_cost - self.baseline_total_cost;
        let delta_pct = if self.baseline_total_cost == 0.0 {
            0.0
        } else {
            delta_amount / self.baseline_total_cost
        };
        let n = self.part_count as f64;

        AggregatedResultRecord {
            group_key,
            group_value,
            source_country,
            part_count: self.part_count,
            inventory_position: self.inventory_position,
            baseline_total_cost: self.baseline_total_cost,
            scenario_total_cost: self.scenario_total_cost,
            delta_amount,
            delta_pct,
            mean_baseline_tariff_rate_pct: self.baseline_rate_sum / n,
            mean_scenario_tariff_rate_pct: self.scenario_rate_sum / n,
        }
    }
}

fn group_value<'a>(row: &'a ScenarioResultRecord, key: GroupKey) -> Result<&'a str> {
    match key {
        GroupKey::ByPart => Ok(&row.part_id),
        GroupKey::ByDescription => Ok(&row.description),
        GroupKey::ByCommodity => {
            row.commodity
                .as_deref()
                .ok_or_else(|| EngineError::MissingGroupValue {
                    part_id: row.part_id.clone(),
                    key: key.name().to_string(),
                })
        }
    }
}

/// Group `results` by `(group_key value, source_country)`.
///
/// Output has one row per distinct pair, in order of first appearance.
///
/// # Errors
///
/// `MissingGroupValue` when grouping by commodity and a row has none. The
/// whole input is checked before anything is returned.
pub fn aggregate(
    results: &[ScenarioResultRecord],
    group_key: GroupKey,
) -> Result<Vec<AggregatedResultRecord>> {
    let keys = results
        .iter()
        .map(|row| group_value(row, group_key))
        .collect::<Result<Vec<_>>>()?;

    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<((&str, &str), Accumulator)> = Vec::new();

    for (row, value) in results.iter().zip(keys) {
        let key = (value, row.source_country.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, Accumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.add(row);
    }

    debug!(
        "Aggregated {} records into {} groups by {}",
        results.len(),
        groups.len(),
        group_key
    );

    Ok(groups
        .into_iter()
        .map(|((value, country), acc)| {
            acc.finish(group_key, value.to_string(), country.to_string())
        })
        .collect())
}
