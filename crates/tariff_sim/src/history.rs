//! Historical tariff rates per country.
//!
//! A history is a rectangular grid: one rate per `(country, year)`. It feeds
//! timelines, the heatmap view and the "latest tariff" country cards, and
//! anchors the Monte Carlo simulation. Simulation never alters past values.

use std::collections::BTreeMap;

use tariff_core::types::{TariffOverrideMap, MAX_TARIFF_PCT};
use tracing::debug;

use crate::error::{Result, SimulationError};
use crate::rng::SimRng;

/// Countries tracked by default.
pub const DEFAULT_COUNTRIES: [&str; 5] = ["China", "Vietnam", "Mexico", "USA", "Germany"];

/// First year of the default synthetic history.
pub const DEFAULT_FIRST_YEAR: i32 = 2015;

/// Last year of the default synthetic history.
pub const DEFAULT_LAST_YEAR: i32 = 2024;

/// Range of synthetic historical rates, in percent.
pub const SYNTHETIC_RATE_RANGE_PCT: (f64, f64) = (5.0, 25.0);

/// One cell of a country × year heatmap.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatmapCell {
    /// Country (row)
    pub country: String,
    /// Year (column)
    pub year: i32,
    /// Tariff rate in percent
    pub rate_pct: f64,
}

/// Tariff rates by country over a run of years.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TariffHistory {
    years: Vec<i32>,
    series: BTreeMap<String, Vec<f64>>,
}

impl TariffHistory {
    /// Build a history from explicit series.
    ///
    /// # Errors
    ///
    /// `InvalidHistory` when there are no years or countries, years are not
    /// strictly increasing, a series length differs from the year count, or
    /// a rate falls outside [0, 100].
    pub fn new(years: Vec<i32>, series: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        if years.is_empty() {
            return Err(SimulationError::InvalidHistory("no years".to_string()));
        }
        if series.is_empty() {
            return Err(SimulationError::InvalidHistory("no countries".to_string()));
        }
        if years.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SimulationError::InvalidHistory(
                "years must be strictly increasing".to_string(),
            ));
        }
        for (country, rates) in &series {
            if rates.len() != years.len() {
                return Err(SimulationError::InvalidHistory(format!(
                    "{}: {} rates for {} years",
                    country,
                    rates.len(),
                    years.len()
                )));
            }
            if let Some(bad) = rates
                .iter()
                .find(|r| !r.is_finite() || **r < 0.0 || **r > MAX_TARIFF_PCT)
            {
                return Err(SimulationError::InvalidHistory(format!(
                    "{}: rate {} outside [0, {}]",
                    country, bad, MAX_TARIFF_PCT
                )));
            }
        }
        Ok(Self { years, series })
    }

    /// Generate a reproducible mock history.
    ///
    /// Each country-year rate is drawn uniformly from
    /// [`SYNTHETIC_RATE_RANGE_PCT`]. Countries are drawn in the order given.
    pub fn synthetic<S: AsRef<str>>(
        first_year: i32,
        last_year: i32,
        countries: &[S],
        seed: u64,
    ) -> Result<Self> {
        if last_year < first_year {
            return Err(SimulationError::InvalidHistory(format!(
                "last year {} precedes first year {}",
                last_year, first_year
            )));
        }

        let years: Vec<i32> = (first_year..=last_year).collect();
        let series = draw_series(&years, countries, seed);

        debug!(
            "Synthetic tariff history: {} countries, {}-{}, seed {}",
            series.len(),
            first_year,
            last_year,
            seed
        );
        Self::new(years, series)
    }

    /// Default mock history: five countries over 2015–2024.
    pub fn default_synthetic(seed: u64) -> Self {
        let years: Vec<i32> = (DEFAULT_FIRST_YEAR..=DEFAULT_LAST_YEAR).collect();
        let series = draw_series(&years, &DEFAULT_COUNTRIES, seed);
        Self { years, series }
    }

    /// Years covered, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Countries covered, in name order.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// True if the country has a series.
    pub fn contains(&self, country: &str) -> bool {
        self.series.contains_key(country)
    }

    /// Rates for a country, aligned with [`TariffHistory::years`].
    pub fn series(&self, country: &str) -> Result<&[f64]> {
        self.series
            .get(country)
            .map(Vec::as_slice)
            .ok_or_else(|| SimulationError::UnknownCountry(country.to_string()))
    }

    /// Rate for a country in a given year, if that year is covered.
    pub fn rate(&self, country: &str, year: i32) -> Result<Option<f64>> {
        let series = self.series(country)?;
        Ok(self
            .years
            .iter()
            .position(|&y| y == year)
            .map(|i| series[i]))
    }

    /// Most recent rate for a country.
    pub fn latest(&self, country: &str) -> Result<f64> {
        let series = self.series(country)?;
        series
            .last()
            .copied()
            .ok_or_else(|| SimulationError::InvalidHistory(format!("{}: empty series", country)))
    }

    /// Most recent rate for every country.
    pub fn latest_rates(&self) -> Vec<(String, f64)> {
        self.series
            .iter()
            .filter_map(|(c, rates)| rates.last().map(|r| (c.clone(), *r)))
            .collect()
    }

    /// Restrict to the given countries, in name order.
    pub fn subset<S: AsRef<str>>(&self, countries: &[S]) -> Result<Self> {
        let mut series = BTreeMap::new();
        for country in countries {
            let country = country.as_ref();
            series.insert(country.to_string(), self.series(country)?.to_vec());
        }
        Self::new(self.years.clone(), series)
    }

    /// Flatten into heatmap cells, country-major.
    pub fn heatmap(&self) -> Vec<HeatmapCell> {
        self.series
            .iter()
            .flat_map(|(country, rates)| {
                self.years
                    .iter()
                    .zip(rates)
                    .map(move |(&year, &rate_pct)| HeatmapCell {
                        country: country.clone(),
                        year,
                        rate_pct,
                    })
            })
            .collect()
    }

    /// Override map pinning every country to its latest rate.
    pub fn as_overrides(&self) -> Result<TariffOverrideMap> {
        Ok(TariffOverrideMap::from_pairs(self.latest_rates())?)
    }
}

fn draw_series<S: AsRef<str>>(
    years: &[i32],
    countries: &[S],
    seed: u64,
) -> BTreeMap<String, Vec<f64>> {
    let (low, high) = SYNTHETIC_RATE_RANGE_PCT;
    let mut rng = SimRng::from_seed(seed);
    countries
        .iter()
        .map(|country| {
            let rates: Vec<f64> = years.iter().map(|_| rng.gen_range(low, high)).collect();
            (country.as_ref().to_string(), rates)
        })
        .collect()
}
