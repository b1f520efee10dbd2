//! End-to-end flow across history, simulation and the scenario engine.
//!
//! Mirrors one dashboard session: load a baseline, look up latest rates,
//! run a what-if scenario, then simulate future tariffs and cost them.

use approx::assert_relative_eq;
use tariff_core::traits::{BubbleSize, CostDelta};
use tariff_core::types::{GroupKey, PartRecord, TariffOverrideMap};
use tariff_engine::{summarise, ScenarioCostEngine};
use tariff_sim::history::DEFAULT_COUNTRIES;
use tariff_sim::{cost_distribution, SimulationConfig, TariffHistory, TariffSimulator};

fn baseline() -> Vec<PartRecord> {
    vec![
        PartRecord::new("E-100", "Controller board", "China")
            .with_commodity("Electronics")
            .with_unit_cost(42.0)
            .with_tariff_rate(18.0)
            .with_warehouse_cost(1.2)
            .with_indirect_cost(0.8)
            .with_inventory_position(250.0)
            .with_baseline_total_cost(12_890.0),
        PartRecord::new("E-200", "Sensor", "Vietnam")
            .with_commodity("Electronics")
            .with_unit_cost(6.5)
            .with_tariff_rate(9.0)
            .with_warehouse_cost(0.3)
            .with_indirect_cost(0.2)
            .with_inventory_position(1_200.0)
            .with_baseline_total_cost(9_100.0),
        PartRecord::new("S-300", "Steel bracket", "Mexico")
            .with_commodity("Steel")
            .with_unit_cost(3.1)
            .with_tariff_rate(5.0)
            .with_warehouse_cost(0.15)
            .with_indirect_cost(0.1)
            .with_inventory_position(4_000.0)
            .with_baseline_total_cost(14_000.0),
        PartRecord::new("A-400", "Cotton liner", "China")
            .with_commodity("Apparel")
            .with_unit_cost(1.4)
            .with_tariff_rate(18.0)
            .with_warehouse_cost(0.05)
            .with_indirect_cost(0.05)
            .with_inventory_position(0.0)
            .with_baseline_total_cost(0.0),
    ]
}

#[test]
fn test_scenario_from_latest_history() {
    let engine = ScenarioCostEngine::new(baseline()).unwrap();
    let history = TariffHistory::synthetic(2015, 2024, &DEFAULT_COUNTRIES, 2024).unwrap();

    let overrides = history
        .subset(&["China", "Vietnam"])
        .unwrap()
        .as_overrides()
        .unwrap();
    let rows = engine.run(&overrides);

    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[0].scenario_tariff_rate_pct,
        history.latest("China").unwrap()
    );
    assert_eq!(rows[2].scenario_tariff_rate_pct, 5.0);
    assert_eq!(rows[3].delta_pct, 0.0);

    let grouped = engine
        .run_grouped(&overrides, GroupKey::ByCommodity)
        .unwrap();
    assert_eq!(grouped.len(), 4);
    assert_relative_eq!(
        summarise(&grouped).scenario_total_cost,
        summarise(&rows).scenario_total_cost,
        epsilon = 1e-6
    );

    for row in &grouped {
        assert!(BubbleSize::AbsDeltaAmount.size_of(row) >= 0.0);
        assert!(!row.label().is_empty());
    }
}

#[test]
fn test_what_if_then_simulate() {
    let engine = ScenarioCostEngine::new(baseline()).unwrap();

    let what_if = TariffOverrideMap::new().with_rate("China", 60.0).unwrap();
    let summary = engine.summary(&what_if);
    assert!(summary.delta_amount > 0.0);
    assert!(summary.increased >= 1);

    let history = TariffHistory::default_synthetic(99);
    let simulator = TariffSimulator::new(SimulationConfig {
        volatility_pct: 8.0,
        runs: 400,
        seed: 5,
    })
    .unwrap();
    let samples = simulator
        .simulate_countries(&history, &["China", "Vietnam", "Mexico"])
        .unwrap();
    let dist = cost_distribution(&engine, &samples).unwrap();

    assert_eq!(dist.totals.len(), 400);
    assert!(dist.summary.p5 <= dist.summary.median);
    assert!(dist.summary.median <= dist.summary.p95);
    let share = dist.exceedance(dist.summary.median);
    assert!((0.0..=0.5).contains(&share));
}
