//! Traits shared between the scenario engine and its consumers.
//!
//! - [`CostDelta`]: Read-only view over a baseline-vs-scenario cost row
//! - [`BubbleSize`]: Choice of metric driving bubble size in scatter views

use std::str::FromStr;

use crate::types::EngineError;

/// A row comparing baseline cost with scenario cost.
///
/// Implemented by both per-part and aggregated scenario output, so render
/// surfaces can build tables and chart traces without caring which one they
/// were handed.
///
/// `delta_pct` is a fraction (0.258 means +25.8%).
pub trait CostDelta {
    /// Display label (part identifier or aggregation value).
    fn label(&self) -> &str;

    /// Sourcing country of the row.
    fn source_country(&self) -> &str;

    /// Baseline total cost to serve.
    fn baseline_total_cost(&self) -> f64;

    /// Scenario total cost to serve.
    fn scenario_total_cost(&self) -> f64;

    /// Unit quantity behind the row.
    fn inventory_position(&self) -> f64;

    /// Scenario minus baseline.
    fn delta_amount(&self) -> f64 {
        self.scenario_total_cost() - self.baseline_total_cost()
    }

    /// Delta relative to baseline; zero when the baseline is zero.
    fn delta_pct(&self) -> f64 {
        let baseline = self.baseline_total_cost();
        if baseline == 0.0 {
            0.0
        } else {
            self.delta_amount() / baseline
        }
    }
}

/// Metric used to size bubbles in a scatter view of deltas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BubbleSize {
    /// Units on hand
    #[default]
    InventoryPosition,
    /// Absolute delta amount
    AbsDeltaAmount,
    /// Absolute delta fraction
    AbsDeltaPct,
}

impl BubbleSize {
    /// Bubble size for a row.
    pub fn size_of<R: CostDelta + ?Sized>(&self, row: &R) -> f64 {
        match self {
            BubbleSize::InventoryPosition => row.inventory_position(),
            BubbleSize::AbsDeltaAmount => row.delta_amount().abs(),
            BubbleSize::AbsDeltaPct => row.delta_pct().abs(),
        }
    }
}

impl FromStr for BubbleSize {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "inventory" | "inventory_position" => Ok(BubbleSize::InventoryPosition),
            "delta" | "abs_delta_amount" => Ok(BubbleSize::AbsDeltaAmount),
            "delta_pct" | "abs_delta_pct" => Ok(BubbleSize::AbsDeltaPct),
            _ => Err(EngineError::invalid_input(format!(
                "unknown bubble size metric: {}",
                s
            ))),
        }
    }
}
