//! Tariff percentages and per-country override maps.

use std::collections::BTreeMap;
use std::fmt;

use super::error::{EngineError, Result};

/// Upper bound of a tariff rate, in percent.
pub const MAX_TARIFF_PCT: f64 = 100.0;

/// A tariff rate in percent, guaranteed finite and within [0, 100].
///
/// # Examples
/// ```
/// use tariff_core::types::TariffRate;
///
/// let rate = TariffRate::new(50.0).unwrap();
/// assert_eq!(rate.pct(), 50.0);
/// assert_eq!(rate.multiplier(), 1.5);
///
/// assert!(TariffRate::new(-1.0).is_err());
/// assert!(TariffRate::new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct TariffRate(f64);

impl TariffRate {
    /// Zero tariff.
    pub const ZERO: Self = Self(0.0);

    /// Validate and wrap a percentage.
    pub fn new(pct: f64) -> Result<Self> {
        if pct.is_finite() && (0.0..=MAX_TARIFF_PCT).contains(&pct) {
            Ok(Self(pct))
        } else {
            Err(EngineError::InvalidRate(pct))
        }
    }

    fn for_country(country: &str, pct: f64) -> Result<Self> {
        Self::new(pct).map_err(|_| EngineError::InvalidTariffRate {
            country: country.to_string(),
            rate: pct,
        })
    }

    /// Rate in percent.
    #[inline]
    pub fn pct(self) -> f64 {
        self.0
    }

    /// Rate as a fraction (20% -> 0.2).
    #[inline]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Cost multiplier `1 + rate / 100`.
    #[inline]
    pub fn multiplier(self) -> f64 {
        1.0 + self.fraction()
    }
}

impl TryFrom<f64> for TariffRate {
    type Error = EngineError;

    fn try_from(pct: f64) -> Result<Self> {
        Self::new(pct)
    }
}

impl From<TariffRate> for f64 {
    fn from(rate: TariffRate) -> f64 {
        rate.0
    }
}

impl fmt::Display for TariffRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Mapping from source country to an override tariff rate.
///
/// Countries absent from the map keep their baseline rate. An empty map is
/// the identity scenario.
///
/// # Examples
/// ```
/// use tariff_core::types::TariffOverrideMap;
///
/// let overrides = TariffOverrideMap::new()
///     .with_rate("China", 50.0).unwrap()
///     .with_rate("Vietnam", 12.0).unwrap();
///
/// assert_eq!(overrides.len(), 2);
/// assert_eq!(overrides.get("China").map(|r| r.pct()), Some(50.0));
/// assert!(overrides.get("Germany").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TariffOverrideMap {
    rates: BTreeMap<String, TariffRate>,
}

impl TariffOverrideMap {
    /// Create an empty (identity) override map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the override for a country, replacing any previous value.
    pub fn set(&mut self, country: impl Into<String>, pct: f64) -> Result<()> {
        let country = country.into();
        let rate = TariffRate::for_country(&country, pct)?;
        self.rates.insert(country, rate);
        Ok(())
    }

    /// Builder form of [`TariffOverrideMap::set`].
    pub fn with_rate(mut self, country: impl Into<String>, pct: f64) -> Result<Self> {
        self.set(country, pct)?;
        Ok(self)
    }

    /// Build from `(country, percent)` pairs; the last pair wins on repeats.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (country, pct) in pairs {
            map.set(country, pct)?;
        }
        Ok(map)
    }

    /// Override for a country, if any.
    pub fn get(&self, country: &str) -> Option<TariffRate> {
        self.rates.get(country).copied()
    }

    /// Override for `country`, or `baseline_pct` when unmapped.
    #[inline]
    pub fn effective_rate(&self, country: &str, baseline_pct: f64) -> f64 {
        self.get(country).map_or(baseline_pct, TariffRate::pct)
    }

    /// Number of overridden countries.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no country is overridden.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterate overrides in country order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TariffRate)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Merge `other` over `self`; `other` wins on shared countries.
    pub fn merged(&self, other: &Self) -> Self {
        let mut rates = self.rates.clone();
        rates.extend(other.rates.iter().map(|(k, v)| (k.clone(), *v)));
        Self { rates }
    }
}

impl TryFrom<BTreeMap<String, f64>> for TariffOverrideMap {
    type Error = EngineError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self> {
        Self::from_pairs(raw)
    }
}
