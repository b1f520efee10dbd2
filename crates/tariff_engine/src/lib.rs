//! # tariff_engine: Scenario Cost Engine
//!
//! Takes a baseline part table plus a per-country tariff override map and
//! produces a comparable scenario table: new landed cost, absolute delta
//! and fractional delta, optionally aggregated by a grouping key.
//!
//! ## Cost Model
//!
//! ```text
//! tariffed_unit_cost  = unit_cost * (1 + effective_rate / 100)
//! full_unit_cost      = tariffed_unit_cost + warehouse + indirect
//! scenario_total_cost = full_unit_cost * inventory_position
//! delta_amount        = scenario_total_cost - baseline_total_cost
//! delta_pct           = delta_amount / baseline_total_cost   (0 when baseline is 0)
//! ```
//!
//! `delta_pct` is always a fraction: `0.258` means +25.8%.
//!
//! ## Usage Examples
//!
//! ```rust
//! use tariff_core::types::{PartRecord, TariffOverrideMap};
//! use tariff_engine::compute_scenario;
//!
//! let parts = vec![PartRecord::new("P-001", "Motor housing", "China")
//!     .with_unit_cost(12.5)
//!     .with_tariff_rate(20.0)
//!     .with_warehouse_cost(0.5)
//!     .with_indirect_cost(0.25)
//!     .with_inventory_position(100.0)
//!     .with_baseline_total_cost(1550.0)];
//!
//! let overrides = TariffOverrideMap::new().with_rate("China", 50.0).unwrap();
//! let results = compute_scenario(&parts, &overrides).unwrap();
//!
//! assert!((results[0].scenario_total_cost - 1950.0).abs() < 1e-9);
//! assert!((results[0].delta_amount - 400.0).abs() < 1e-9);
//! assert!((results[0].delta_pct - 400.0 / 1550.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Rayon row-wise map, identical output to serial
//! - `serde` (default): Serialisation for result records

#![deny(missing_docs)]

pub mod aggregate;
pub mod cost;
pub mod engine;
pub mod scenario;
pub mod summary;
pub mod validate;

pub use aggregate::{aggregate, AggregatedResultRecord};
pub use cost::{landed_total_cost, LandedCost};
pub use engine::ScenarioCostEngine;
pub use scenario::{
    baseline_cost, baseline_divergence, compute_scenario, BaselineDivergence,
    ScenarioResultRecord,
};
pub use summary::{summarise, ScenarioSummary};

#[cfg(feature = "parallel")]
pub use scenario::compute_scenario_par;
