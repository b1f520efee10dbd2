//! CLI configuration management.
//!
//! Loads `tariffscope.toml` with `TARIFFSCOPE_*` environment variable
//! overrides. A missing file falls back to defaults; a malformed one is an
//! error.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tariff_core::traits::BubbleSize;
use tariff_core::types::{GroupKey, TariffOverrideMap};
use tariff_sim::history::{DEFAULT_COUNTRIES, DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR};
use tariff_sim::monte_carlo::{MAX_RUNS, MAX_VOLATILITY_PCT};
use tariff_sim::SimulationConfig;
use thiserror::Error;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// `[simulation]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationSection {
    /// Standard deviation of simulated rates, in percentage points
    pub volatility_pct: f64,
    /// Draws per country
    pub runs: usize,
    /// RNG seed
    pub seed: u64,
}

impl Default for SimulationSection {
    fn default() -> Self {
        let defaults = SimulationConfig::default();
        Self {
            volatility_pct: defaults.volatility_pct,
            runs: defaults.runs,
            seed: defaults.seed,
        }
    }
}

impl From<&SimulationSection> for SimulationConfig {
    fn from(section: &SimulationSection) -> Self {
        Self {
            volatility_pct: section.volatility_pct,
            runs: section.runs,
            seed: section.seed,
        }
    }
}

/// `[history]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistorySection {
    /// First year of the synthetic history
    pub first_year: i32,
    /// Last year of the synthetic history
    pub last_year: i32,
    /// Countries tracked
    pub countries: Vec<String>,
    /// RNG seed for the synthetic history
    pub seed: u64,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            first_year: DEFAULT_FIRST_YEAR,
            last_year: DEFAULT_LAST_YEAR,
            countries: DEFAULT_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            seed: 42,
        }
    }
}

/// tariffscope configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TariffScopeConfig {
    /// Log level
    pub log_level: String,
    /// Default output format
    pub format: OutputFormat,
    /// Default grouping for `scenario`; ungrouped when absent
    pub group_by: Option<GroupKey>,
    /// Metric reported in the bubble column
    pub bubble_size: String,
    /// Relative tolerance for supplied-vs-recomputed baseline checks
    pub divergence_tolerance: f64,
    /// Standing tariff overrides, percent by country
    pub overrides: BTreeMap<String, f64>,
    /// Monte Carlo settings
    pub simulation: SimulationSection,
    /// Historical tariff settings
    pub history: HistorySection,
}

impl Default for TariffScopeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: OutputFormat::default(),
            group_by: None,
            bubble_size: "inventory".to_string(),
            divergence_tolerance: 0.01,
            overrides: BTreeMap::new(),
            simulation: SimulationSection::default(),
            history: HistorySection::default(),
        }
    }
}

impl TariffScopeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Every value that fails to parse is reported; none is skipped.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(log_level) = lookup("TARIFFSCOPE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(format) = lookup("TARIFFSCOPE_FORMAT") {
            match format.parse::<OutputFormat>() {
                Ok(format) => self.format = format,
                Err(e) => errors.push(format!("TARIFFSCOPE_FORMAT: {}", e)),
            }
        }

        if let Some(group_by) = lookup("TARIFFSCOPE_GROUP_BY") {
            match group_by.parse::<GroupKey>() {
                Ok(key) => self.group_by = Some(key),
                Err(e) => errors.push(format!("TARIFFSCOPE_GROUP_BY: {}", e)),
            }
        }

        if let Some(volatility) = lookup("TARIFFSCOPE_VOLATILITY") {
            match volatility.parse::<f64>() {
                Ok(volatility) => self.simulation.volatility_pct = volatility,
                Err(_) => errors.push(format!(
                    "TARIFFSCOPE_VOLATILITY: '{}' is not a number",
                    volatility
                )),
            }
        }

        if let Some(runs) = lookup("TARIFFSCOPE_RUNS") {
            match runs.parse::<usize>() {
                Ok(runs) => self.simulation.runs = runs,
                Err(_) => errors.push(format!("TARIFFSCOPE_RUNS: '{}' is not a count", runs)),
            }
        }

        if let Some(seed) = lookup("TARIFFSCOPE_SEED") {
            match seed.parse::<u64>() {
                Ok(seed) => self.simulation.seed = seed,
                Err(_) => errors.push(format!("TARIFFSCOPE_SEED: '{}' is not a seed", seed)),
            }
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate the configuration, reporting every problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if let Err(e) = self.bubble_size.parse::<BubbleSize>() {
            errors.push(e.to_string());
        }

        if !self.divergence_tolerance.is_finite() || self.divergence_tolerance < 0.0 {
            errors.push(format!(
                "divergence_tolerance must be a non-negative number, got {}",
                self.divergence_tolerance
            ));
        }

        if let Err(e) = self.tariff_overrides() {
            errors.push(format!("overrides: {}", e));
        }

        let sim = &self.simulation;
        if !sim.volatility_pct.is_finite()
            || !(0.0..=MAX_VOLATILITY_PCT).contains(&sim.volatility_pct)
        {
            errors.push(format!(
                "simulation.volatility_pct {} outside [0, {}]",
                sim.volatility_pct, MAX_VOLATILITY_PCT
            ));
        }
        if sim.runs == 0 || sim.runs > MAX_RUNS {
            errors.push(format!(
                "simulation.runs {} outside [1, {}]",
                sim.runs, MAX_RUNS
            ));
        }

        let history = &self.history;
        if history.last_year < history.first_year {
            errors.push(format!(
                "history.last_year {} precedes history.first_year {}",
                history.last_year, history.first_year
            ));
        }
        if history.countries.is_empty() {
            errors.push("history.countries cannot be empty".to_string());
        }
        if history.countries.iter().any(|c| c.trim().is_empty()) {
            errors.push("history.countries contains an empty name".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Standing overrides as a validated map
    pub fn tariff_overrides(&self) -> tariff_core::types::Result<TariffOverrideMap> {
        TariffOverrideMap::try_from(self.overrides.clone())
    }

    /// Bubble metric, falling back to inventory position
    pub fn bubble(&self) -> BubbleSize {
        self.bubble_size.parse().unwrap_or_default()
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation errors, all of them
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
