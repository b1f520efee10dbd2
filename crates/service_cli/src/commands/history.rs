//! History command implementation
//!
//! Prints the country × year tariff grid with the latest rate per country.

use std::io::Write;

use tariff_sim::TariffHistory;
use tracing::info;

use crate::config::{OutputFormat, TariffScopeConfig};
use crate::output::write_records;
use crate::Result;

/// Build the configured synthetic history, optionally reseeded and narrowed.
///
/// The full configured country list is always generated first so a
/// country's past does not depend on which other countries are selected.
pub fn build_history(
    config: &TariffScopeConfig,
    countries: &[String],
    seed: Option<u64>,
) -> Result<TariffHistory> {
    let history = TariffHistory::synthetic(
        config.history.first_year,
        config.history.last_year,
        config.history.countries.as_slice(),
        seed.unwrap_or(config.history.seed),
    )?;
    if countries.is_empty() {
        return Ok(history);
    }
    Ok(history.subset(countries)?)
}

/// Run the history command
pub fn run(
    config: &TariffScopeConfig,
    countries: &[String],
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(config, countries, seed, format, &mut out)
}

/// Run the history command against any writer.
pub fn execute<W: Write>(
    config: &TariffScopeConfig,
    countries: &[String],
    seed: Option<u64>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let history = build_history(config, countries, seed)?;
    info!(
        "Tariff history: {} countries over {} years",
        history.countries().count(),
        history.years().len()
    );

    match format {
        OutputFormat::Table => write_grid(out, &history),
        _ => write_records(out, &history.heatmap(), format),
    }
}

fn write_grid<W: Write>(out: &mut W, history: &TariffHistory) -> Result<()> {
    let width = history
        .countries()
        .map(str::len)
        .max()
        .unwrap_or(0)
        .max("Country".len());

    write!(out, "{:<width$}", "Country", width = width)?;
    for year in history.years() {
        write!(out, "  {:>6}", year)?;
    }
    writeln!(out, "  {:>7}", "Latest")?;

    for country in history.countries() {
        write!(out, "{:<width$}", country, width = width)?;
        for rate in history.series(country)? {
            write!(out, "  {:>5.1}%", rate)?;
        }
        writeln!(out, "  {:>6.1}%", history.latest(country)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariff_sim::HeatmapCell;

    fn render(countries: &[String], format: OutputFormat) -> String {
        let mut buf = Vec::new();
        execute(&TariffScopeConfig::default(), countries, Some(3), format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_grid_has_one_row_per_country() {
        let text = render(&[], OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("2015"));
        assert!(lines[0].ends_with("Latest"));
        assert!(lines.iter().any(|l| l.starts_with("Germany")));
    }

    #[test]
    fn test_heatmap_json() {
        let countries = vec!["China".to_string(), "Mexico".to_string()];
        let text = render(&countries, OutputFormat::Json);
        let cells: Vec<HeatmapCell> = serde_json::from_str(&text).unwrap();

        assert_eq!(cells.len(), 20);
        assert!(cells.iter().all(|c| (5.0..25.0).contains(&c.rate_pct)));
    }

    #[test]
    fn test_seed_reproducible() {
        let countries = vec!["Vietnam".to_string()];
        assert_eq!(
            render(&countries, OutputFormat::Csv),
            render(&countries, OutputFormat::Csv)
        );
    }

    #[test]
    fn test_build_history_uses_config_defaults() {
        let config = TariffScopeConfig::default();
        let history = build_history(&config, &[], None).unwrap();
        assert_eq!(history.years().len(), 10);
        assert!(history.contains("USA"));
    }

    #[test]
    fn test_narrowed_history_keeps_full_series() {
        let config = TariffScopeConfig::default();
        let full = build_history(&config, &[], None).unwrap();
        let narrowed = build_history(&config, &["Mexico".to_string()], None).unwrap();

        assert_eq!(narrowed.countries().count(), 1);
        assert_eq!(
            narrowed.series("Mexico").unwrap(),
            full.series("Mexico").unwrap()
        );
        assert_eq!(
            narrowed.latest("Mexico").unwrap(),
            full.latest("Mexico").unwrap()
        );
    }

    #[test]
    fn test_unconfigured_country_rejected() {
        let config = TariffScopeConfig::default();
        let err = build_history(&config, &["Atlantis".to_string()], None).unwrap_err();
        assert!(matches!(err, crate::CliError::Simulation(_)));
    }
}
