//! # tariff_sim: Tariff History and Monte Carlo Simulation
//!
//! Supplies the exploratory side of the tariff dashboard:
//! - Historical tariff series per country, for timelines, heatmaps and
//!   "latest rate" country cards (`history`)
//! - Seeded Monte Carlo draws of future tariff rates around the latest
//!   historical rate (`monte_carlo`)
//! - Distribution statistics for violin/box views (`stats`)
//! - Portfolio cost distributions obtained by running the scenario engine
//!   once per simulated draw (`distribution`)
//!
//! Rates are in percent throughout, matching `tariff_core::types::TariffRate`.
//! Volatility is a standard deviation in percentage points.
//!
//! ## Usage Examples
//!
//! ```rust
//! use tariff_sim::history::TariffHistory;
//! use tariff_sim::monte_carlo::{SimulationConfig, TariffSimulator};
//!
//! let history = TariffHistory::synthetic(2015, 2024, &["China", "Vietnam"], 7).unwrap();
//! let latest = history.latest("China").unwrap();
//! assert!((5.0..=25.0).contains(&latest));
//!
//! let simulator = TariffSimulator::new(SimulationConfig::default()).unwrap();
//! let samples = simulator.simulate_countries(&history, &["China"]).unwrap();
//! assert_eq!(samples.get("China").unwrap().len(), 500);
//! ```

#![deny(missing_docs)]

pub mod distribution;
pub mod error;
pub mod history;
pub mod monte_carlo;
pub mod rng;
pub mod stats;

pub use distribution::{cost_distribution, CostDistribution};
pub use error::{Result, SimulationError};
pub use history::{HeatmapCell, TariffHistory};
pub use monte_carlo::{CountrySamples, SimulationConfig, TariffSimulator};
pub use rng::SimRng;
pub use stats::SampleSummary;
