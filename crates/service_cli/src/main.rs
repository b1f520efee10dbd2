//! tariffscope CLI - Tariff Scenario Costing
//!
//! Operational entry point for the tariff scenario engine.
//!
//! # Commands
//!
//! - `tariffscope scenario --parts <file>` - Baseline vs scenario cost comparison
//! - `tariffscope history` - Historical tariff grid per country
//! - `tariffscope simulate` - Monte Carlo tariff simulation
//! - `tariffscope check` - Validate and print the resolved configuration
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate owns everything at the process
//! boundary: configuration, file ingestion and output rendering. The
//! engine crates below it never read files or the environment.

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod loader;
mod output;

pub use error::{CliError, Result};

use commands::scenario::{resolve_format, ScenarioArgs};
use commands::simulate::SimulateArgs;
use config::TariffScopeConfig;

/// Tariff scenario costing CLI
#[derive(Parser)]
#[command(name = "tariffscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "tariffscope.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare baseline and scenario costs for a part table
    Scenario {
        /// Path to part table (CSV/JSON)
        #[arg(short, long)]
        parts: String,

        /// Tariff override as COUNTRY=PCT (repeatable)
        #[arg(short = 'o', long = "override")]
        overrides: Vec<String>,

        /// Group results by key (part_id, description, commodity)
        #[arg(short, long)]
        group_by: Option<String>,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show historical tariff rates per country
    History {
        /// Countries to include (defaults to the configured list)
        #[arg(long, value_delimiter = ',')]
        countries: Vec<String>,

        /// Seed for the synthetic history
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Simulate future tariff rates and, optionally, portfolio cost
    Simulate {
        /// Countries to simulate (defaults to the configured list)
        #[arg(long, value_delimiter = ',')]
        countries: Vec<String>,

        /// Volatility in percentage points
        #[arg(long)]
        volatility: Option<f64>,

        /// Number of draws per country
        #[arg(short, long)]
        runs: Option<usize>,

        /// RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Part table to price under each draw
        #[arg(short, long)]
        parts: Option<String>,

        /// Output format (json, csv, table)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Check configuration
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = TariffScopeConfig::load_with_env_and_validate(Path::new(&cli.config))
        .with_context(|| format!("loading configuration from {}", cli.config))?;

    let log_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    init_tracing(log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::Scenario {
            parts,
            overrides,
            group_by,
            format,
        } => {
            let args = ScenarioArgs {
                parts,
                overrides,
                group_by,
                format,
            };
            commands::scenario::run(&config, &args)?;
        }
        Commands::History {
            countries,
            seed,
            format,
        } => {
            let format = resolve_format(&config, format.as_deref())?;
            commands::history::run(&config, &countries, seed, format)?;
        }
        Commands::Simulate {
            countries,
            volatility,
            runs,
            seed,
            parts,
            format,
        } => {
            let format = resolve_format(&config, format.as_deref())?;
            let args = SimulateArgs {
                countries,
                volatility,
                runs,
                seed,
                parts,
            };
            commands::simulate::run(&config, &args, format)?;
        }
        Commands::Check => commands::check::run(&config)?,
    }

    Ok(())
}
