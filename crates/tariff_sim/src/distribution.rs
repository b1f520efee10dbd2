//! Portfolio cost distribution under simulated tariffs.
//!
//! Each Monte Carlo draw becomes one override map; the scenario engine is
//! run once per draw and the portfolio scenario total recorded. Draws are
//! independent and evaluated in parallel; output order follows draw order.

use rayon::prelude::*;
use tariff_core::types::TariffOverrideMap;
use tariff_engine::ScenarioCostEngine;
use tracing::info;

use crate::error::Result;
use crate::monte_carlo::CountrySamples;
use crate::stats::SampleSummary;

/// Distribution of portfolio scenario totals across simulated draws.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostDistribution {
    /// Portfolio total at each record's stored rate
    pub baseline_scenario_total: f64,
    /// Portfolio scenario total per draw, in draw order
    pub totals: Vec<f64>,
    /// Statistics over `totals`
    pub summary: SampleSummary,
}

impl CostDistribution {
    /// Share of draws whose total exceeds `threshold`.
    pub fn exceedance(&self, threshold: f64) -> f64 {
        if self.totals.is_empty() {
            return 0.0;
        }
        let hits = self.totals.iter().filter(|&&t| t > threshold).count();
        hits as f64 / self.totals.len() as f64
    }

    /// Mean total minus the stored-rate total.
    pub fn expected_delta(&self) -> f64 {
        self.summary.mean - self.baseline_scenario_total
    }
}

/// Run `engine` once per simulated draw.
///
/// Countries in the baseline that were not simulated keep their stored rate.
///
/// # Errors
///
/// `EmptySample` if `samples` has no draws.
pub fn cost_distribution(
    engine: &ScenarioCostEngine,
    samples: &CountrySamples,
) -> Result<CostDistribution> {
    let totals = (0..samples.runs())
        .into_par_iter()
        .map(|i| {
            samples
                .overrides_at(i)
                .map(|overrides| engine.scenario_total(&overrides))
        })
        .collect::<Result<Vec<f64>>>()?;

    let summary = SampleSummary::from_samples(&totals)?;
    let baseline_scenario_total = engine.scenario_total(&TariffOverrideMap::new());
    info!(
        "Cost distribution over {} draws: mean {:.2}, p95 {:.2} (stored-rate total {:.2})",
        totals.len(),
        summary.mean,
        summary.p95,
        baseline_scenario_total
    );

    Ok(CostDistribution {
        baseline_scenario_total,
        totals,
        summary,
    })
}
