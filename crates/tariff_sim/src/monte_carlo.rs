//! Monte Carlo simulation of future tariff rates.
//!
//! Draws are normal around a base rate (usually the latest historical rate)
//! with a user-chosen volatility. Changing the volatility only changes the
//! simulated future; the history it is anchored on is never touched.

use std::collections::BTreeMap;

use tariff_core::types::{TariffOverrideMap, MAX_TARIFF_PCT};
use tracing::debug;

use crate::error::{Result, SimulationError};
use crate::history::TariffHistory;
use crate::rng::SimRng;
use crate::stats::SampleSummary;

/// Largest accepted volatility, in percentage points.
pub const MAX_VOLATILITY_PCT: f64 = 50.0;

/// Largest accepted number of draws per country.
pub const MAX_RUNS: usize = 100_000;

/// Monte Carlo parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Standard deviation of draws, in percentage points
    pub volatility_pct: f64,
    /// Draws per country
    pub runs: usize,
    /// RNG seed
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            volatility_pct: 15.0,
            runs: 500,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.volatility_pct.is_finite()
            || !(0.0..=MAX_VOLATILITY_PCT).contains(&self.volatility_pct)
        {
            return Err(SimulationError::InvalidConfig(format!(
                "volatility_pct {} outside [0, {}]",
                self.volatility_pct, MAX_VOLATILITY_PCT
            )));
        }
        if self.runs == 0 || self.runs > MAX_RUNS {
            return Err(SimulationError::InvalidConfig(format!(
                "runs {} outside [1, {}]",
                self.runs, MAX_RUNS
            )));
        }
        Ok(())
    }
}

/// Simulated rates per country, all of equal length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountrySamples {
    runs: usize,
    samples: BTreeMap<String, Vec<f64>>,
}

impl CountrySamples {
    /// Draws per country.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Simulated countries, in name order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// Draws for one country.
    pub fn get(&self, country: &str) -> Option<&[f64]> {
        self.samples.get(country).map(Vec::as_slice)
    }

    /// Long-format rows `(country, rate)` as consumed by violin plots.
    pub fn long_format(&self) -> Vec<(&str, f64)> {
        self.samples
            .iter()
            .flat_map(|(c, s)| s.iter().map(move |&r| (c.as_str(), r)))
            .collect()
    }

    /// Per-country distribution statistics.
    pub fn summaries(&self) -> Result<Vec<(String, SampleSummary)>> {
        self.samples
            .iter()
            .map(|(c, s)| SampleSummary::from_samples(s).map(|summary| (c.clone(), summary)))
            .collect()
    }

    /// Override map for draw `index`: every country at its `index`-th draw.
    pub fn overrides_at(&self, index: usize) -> Result<TariffOverrideMap> {
        if index >= self.runs {
            return Err(SimulationError::InvalidConfig(format!(
                "draw {} out of range (runs = {})",
                index, self.runs
            )));
        }
        Ok(TariffOverrideMap::from_pairs(
            self.samples.iter().map(|(c, s)| (c.as_str(), s[index])),
        )?)
    }
}

/// Seeded tariff simulator.
///
/// # Examples
///
/// ```rust
/// use tariff_sim::monte_carlo::{SimulationConfig, TariffSimulator};
///
/// let config = SimulationConfig { volatility_pct: 5.0, runs: 200, seed: 1 };
/// let simulator = TariffSimulator::new(config).unwrap();
/// let draws = simulator.simulate(20.0).unwrap();
///
/// assert_eq!(draws.len(), 200);
/// assert!(draws.iter().all(|r| (0.0..=100.0).contains(r)));
/// assert_eq!(draws, simulator.simulate(20.0).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct TariffSimulator {
    config: SimulationConfig,
}

impl TariffSimulator {
    /// Validate `config` and build a simulator.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Draw `runs` future rates around `base_rate_pct`.
    ///
    /// Draws are clamped to [0, 100] so every one is a valid tariff rate.
    /// Repeated calls with the same base give the same draws.
    pub fn simulate(&self, base_rate_pct: f64) -> Result<Vec<f64>> {
        let mut rng = SimRng::from_seed(self.config.seed);
        self.draw(&mut rng, base_rate_pct)
    }

    /// Simulate each country around its latest historical rate.
    ///
    /// Countries share one RNG stream in the order given.
    pub fn simulate_countries<S: AsRef<str>>(
        &self,
        history: &TariffHistory,
        countries: &[S],
    ) -> Result<CountrySamples> {
        let mut rng = SimRng::from_seed(self.config.seed);
        let mut samples = BTreeMap::new();
        for country in countries {
            let country = country.as_ref();
            let base = history.latest(country)?;
            samples.insert(country.to_string(), self.draw(&mut rng, base)?);
        }

        debug!(
            "Simulated {} countries x {} runs (volatility {} pts, seed {})",
            samples.len(),
            self.config.runs,
            self.config.volatility_pct,
            self.config.seed
        );
        Ok(CountrySamples {
            runs: self.config.runs,
            samples,
        })
    }

    fn draw(&self, rng: &mut SimRng, base_rate_pct: f64) -> Result<Vec<f64>> {
        if !base_rate_pct.is_finite() || !(0.0..=MAX_TARIFF_PCT).contains(&base_rate_pct) {
            return Err(SimulationError::InvalidConfig(format!(
                "base rate {} outside [0, {}]",
                base_rate_pct, MAX_TARIFF_PCT
            )));
        }

        let mut draws = vec![0.0; self.config.runs];
        rng.fill_normal(&mut draws, base_rate_pct, self.config.volatility_pct);
        for rate in draws.iter_mut() {
            *rate = rate.clamp(0.0, MAX_TARIFF_PCT);
        }
        Ok(draws)
    }
}
