//! Portfolio-level totals over scenario output.

use tariff_core::traits::CostDelta;

/// Totals across a scenario comparison table.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSummary {
    /// Number of rows summarised
    pub row_count: usize,
    /// Summed baseline total cost
    pub baseline_total_cost: f64,
    /// Summed scenario total cost
    pub scenario_total_cost: f64,
    /// Scenario minus baseline
    pub delta_amount: f64,
    /// Fractional delta, 0 for a zero baseline
    pub delta_pct: f64,
    /// Rows whose cost rises under the scenario
    pub increased: usize,
    /// Rows whose cost falls under the scenario
    pub decreased: usize,
}

/// Summarise any slice of per-part or aggregated rows.
///
/// Summing aggregated rows gives the same totals as summing the per-part
/// rows they came from.
pub fn summarise<R: CostDelta>(rows: &[R]) -> ScenarioSummary {
    let mut summary = ScenarioSummary {
        row_count: rows.len(),
        ..Default::default()
    };
    for row in rows {
        summary.baseline_total_cost += row.baseline_total_cost();
        summary.scenario_total_cost += row.scenario_total_cost();
        let delta = row.delta_amount();
        if delta > 0.0 {
            summary.increased += 1;
        } else if delta < 0.0 {
            summary.decreased += 1;
        }
    }
    summary.delta_amount = summary.scenario_total_cost - summary.baseline_total_cost;
    summary.delta_pct = if summary.baseline_total_cost == 0.0 {
        0.0
    } else {
        summary.delta_amount / summary.baseline_total_cost
    };
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate, compute_scenario};
    use approx::assert_relative_eq;
    use tariff_core::types::{GroupKey, PartRecord, TariffOverrideMap};

    fn table() -> Vec<PartRecord> {
        vec![
            PartRecord::new("A", "Valve", "China")
                .with_commodity("Steel")
                .with_unit_cost(2.0)
                .with_tariff_rate(25.0)
                .with_inventory_position(100.0)
                .with_baseline_total_cost(250.0),
            PartRecord::new("B", "Pump", "Germany")
                .with_commodity("Steel")
                .with_unit_cost(50.0)
                .with_tariff_rate(0.0)
                .with_inventory_position(4.0)
                .with_baseline_total_cost(210.0),
        ]
    }

    #[test]
    fn test_summary_totals() {
        let overrides = TariffOverrideMap::new().with_rate("China", 50.0).unwrap();
        let rows = compute_scenario(&table(), &overrides).unwrap();
        let summary = summarise(&rows);

        // A: 2 * 1.5 * 100 = 300, B: 50 * 4 = 200
        assert_eq!(summary.row_count, 2);
        assert_relative_eq!(summary.scenario_total_cost, 500.0, epsilon = 1e-9);
        assert_relative_eq!(summary.baseline_total_cost, 460.0);
        assert_relative_eq!(summary.delta_amount, 40.0, epsilon = 1e-9);
        assert_eq!(summary.increased, 1);
        assert_eq!(summary.decreased, 1);
    }

    #[test]
    fn test_summary_matches_after_aggregation() {
        let rows = compute_scenario(&table(), &TariffOverrideMap::new()).unwrap();
        let grouped = aggregate(&rows, GroupKey::ByCommodity).unwrap();
        let a = summarise(&rows);
        let b = summarise(&grouped);
        assert_relative_eq!(a.scenario_total_cost, b.scenario_total_cost, epsilon = 1e-9);
        assert_relative_eq!(a.baseline_total_cost, b.baseline_total_cost);
    }

    #[test]
    fn test_empty_summary() {
        let rows: Vec<crate::ScenarioResultRecord> = Vec::new();
        let summary = summarise(&rows);
        assert_eq!(summary, ScenarioSummary::default());
    }
}
