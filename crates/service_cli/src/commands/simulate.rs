//! Simulate command implementation
//!
//! Draws future tariff rates around each country's latest historical rate
//! and, given a part table, prices the portfolio under every draw.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tariff_engine::ScenarioCostEngine;
use tariff_sim::{cost_distribution, SampleSummary, SimulationConfig, TariffSimulator};
use tracing::info;

use crate::commands::history::build_history;
use crate::config::{OutputFormat, TariffScopeConfig};
use crate::loader::load_parts;
use crate::output::write_records;
use crate::Result;

/// Arguments of `tariffscope simulate`
#[derive(Debug, Clone, Default)]
pub struct SimulateArgs {
    /// Countries to simulate; the configured list when empty
    pub countries: Vec<String>,
    /// Volatility in percentage points, overriding the config
    pub volatility: Option<f64>,
    /// Draws per country, overriding the config
    pub runs: Option<usize>,
    /// RNG seed, overriding the config
    pub seed: Option<u64>,
    /// Optional part table to price under each draw
    pub parts: Option<String>,
}

/// One row of simulated rate statistics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountryStatsRow {
    /// Country, or `portfolio` for the cost distribution
    pub country: String,
    /// Latest historical rate, or stored-rate portfolio total
    pub anchor: f64,
    /// Number of draws
    pub count: usize,
    /// Mean draw
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Smallest draw
    pub min: f64,
    /// 5th percentile
    pub p5: f64,
    /// Median
    pub median: f64,
    /// 95th percentile
    pub p95: f64,
    /// Largest draw
    pub max: f64,
}

impl CountryStatsRow {
    fn new(country: impl Into<String>, anchor: f64, summary: &SampleSummary) -> Self {
        Self {
            country: country.into(),
            anchor,
            count: summary.count,
            mean: summary.mean,
            std_dev: summary.std_dev,
            min: summary.min,
            p5: summary.p5,
            median: summary.median,
            p95: summary.p95,
            max: summary.max,
        }
    }
}

/// Simulation parameters after layering arguments over the config.
pub fn resolve_config(config: &TariffScopeConfig, args: &SimulateArgs) -> SimulationConfig {
    let mut sim = SimulationConfig::from(&config.simulation);
    if let Some(volatility) = args.volatility {
        sim.volatility_pct = volatility;
    }
    if let Some(runs) = args.runs {
        sim.runs = runs;
    }
    if let Some(seed) = args.seed {
        sim.seed = seed;
    }
    sim
}

/// Run the simulate command
pub fn run(config: &TariffScopeConfig, args: &SimulateArgs, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(config, args, format, &mut out)
}

/// Run the simulate command against any writer.
pub fn execute<W: Write>(
    config: &TariffScopeConfig,
    args: &SimulateArgs,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let simulator = TariffSimulator::new(resolve_config(config, args))?;
    let history = build_history(config, &[], None)?;
    let countries = if args.countries.is_empty() {
        config.history.countries.clone()
    } else {
        args.countries.clone()
    };

    info!("Starting simulation...");
    info!("  Countries: {}", countries.join(", "));
    info!("  Volatility: {} pts", simulator.config().volatility_pct);
    info!("  Runs: {}", simulator.config().runs);

    let samples = simulator.simulate_countries(&history, &countries)?;
    let mut rows = samples
        .summaries()?
        .into_iter()
        .map(|(country, summary)| {
            history
                .latest(&country)
                .map(|latest| CountryStatsRow::new(country, latest, &summary))
        })
        .collect::<tariff_sim::Result<Vec<_>>>()?;

    if let Some(parts) = &args.parts {
        let engine = ScenarioCostEngine::new(load_parts(Path::new(parts))?)?;
        let dist = cost_distribution(&engine, &samples)?;
        rows.push(CountryStatsRow::new(
            "portfolio",
            dist.baseline_scenario_total,
            &dist.summary,
        ));
    }

    match format {
        OutputFormat::Table => write_stats_table(out, &rows),
        _ => write_records(out, &rows, format),
    }
}

fn write_stats_table<W: Write>(out: &mut W, rows: &[CountryStatsRow]) -> Result<()> {
    let width = rows
        .iter()
        .map(|r| r.country.len())
        .max()
        .unwrap_or(0)
        .max("Country".len());

    writeln!(
        out,
        "{:<width$}  {:>12}  {:>12}  {:>10}  {:>12}  {:>12}  {:>12}",
        "Country",
        "Anchor",
        "Mean",
        "Std dev",
        "P5",
        "Median",
        "P95",
        width = width
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<width$}  {:>12.2}  {:>12.2}  {:>10.2}  {:>12.2}  {:>12.2}  {:>12.2}",
            row.country,
            row.anchor,
            row.mean,
            row.std_dev,
            row.p5,
            row.median,
            row.p95,
            width = width
        )?;
    }
    Ok(())
}
