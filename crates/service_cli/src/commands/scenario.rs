//! Scenario command implementation
//!
//! Loads a part table, applies tariff overrides and prints the baseline vs
//! scenario comparison, optionally grouped.

use std::io::Write;
use std::path::Path;

use tariff_core::types::{GroupKey, TariffOverrideMap};
use tariff_engine::{summarise, ScenarioCostEngine};
use tracing::{debug, info, warn};

use crate::config::{OutputFormat, TariffScopeConfig};
use crate::loader::load_parts;
use crate::output::{write_delta_table, write_records, write_summary};
use crate::{CliError, Result};

/// Arguments of `tariffscope scenario`
#[derive(Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// Part table path
    pub parts: String,
    /// `COUNTRY=PCT` overrides from the command line
    pub overrides: Vec<String>,
    /// Grouping key name, overriding the config
    pub group_by: Option<String>,
    /// Output format name, overriding the config
    pub format: Option<String>,
}

/// Parse one `COUNTRY=PCT` argument.
pub fn parse_override(arg: &str) -> Result<(String, f64)> {
    let (country, pct) = arg.split_once('=').ok_or_else(|| {
        CliError::invalid_argument(format!("override '{}' is not COUNTRY=PCT", arg))
    })?;
    let country = country.trim();
    if country.is_empty() {
        return Err(CliError::invalid_argument(format!(
            "override '{}' has no country",
            arg
        )));
    }
    let pct = pct.trim().parse::<f64>().map_err(|_| {
        CliError::invalid_argument(format!("override '{}' has a non-numeric rate", arg))
    })?;
    Ok((country.to_string(), pct))
}

/// Config overrides with command-line overrides layered on top.
pub fn resolve_overrides(config: &TariffScopeConfig, args: &[String]) -> Result<TariffOverrideMap> {
    let pairs = args
        .iter()
        .map(|arg| parse_override(arg))
        .collect::<Result<Vec<_>>>()?;
    let cli = TariffOverrideMap::from_pairs(pairs)?;
    Ok(config.tariff_overrides()?.merged(&cli))
}

/// Resolve an output format name, falling back to the config.
pub fn resolve_format(config: &TariffScopeConfig, format: Option<&str>) -> Result<OutputFormat> {
    match format {
        Some(name) => name.parse().map_err(CliError::InvalidArgument),
        None => Ok(config.format),
    }
}

/// Run the scenario command
pub fn run(config: &TariffScopeConfig, args: &ScenarioArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(config, args, &mut out)
}

/// Run the scenario command against any writer.
pub fn execute<W: Write>(config: &TariffScopeConfig, args: &ScenarioArgs, out: &mut W) -> Result<()> {
    let format = resolve_format(config, args.format.as_deref())?;
    let group_by = match args.group_by.as_deref() {
        Some(name) => Some(name.parse::<GroupKey>()?),
        None => config.group_by,
    };
    let overrides = resolve_overrides(config, &args.overrides)?;

    info!("Starting scenario...");
    info!("  Parts: {}", args.parts);
    info!("  Overrides: {}", overrides.len());
    info!("  Output format: {}", format);

    let engine = ScenarioCostEngine::new(load_parts(Path::new(&args.parts))?)?;

    let known = engine.countries();
    let unknown: Vec<&str> = overrides
        .iter()
        .map(|(country, _)| country)
        .filter(|country| !known.contains(country))
        .collect();
    if !unknown.is_empty() {
        warn!("Overrides for countries absent from the part table: {:?}", unknown);
    }

    for d in engine.divergence(config.divergence_tolerance) {
        debug!(
            "{}: supplied baseline {:.2}, recomputed {:.2}",
            d.part_id, d.supplied, d.recomputed
        );
    }

    let bubble = config.bubble();
    match group_by {
        Some(key) => {
            let rows = engine.run_grouped(&overrides, key)?;
            if format == OutputFormat::Table {
                write_delta_table(out, &rows, bubble)?;
                write_summary(out, &summarise(&rows))?;
            } else {
                write_records(out, &rows, format)?;
            }
        }
        None => {
            let rows = engine.run(&overrides);
            if format == OutputFormat::Table {
                write_delta_table(out, &rows, bubble)?;
                write_summary(out, &summarise(&rows))?;
            } else {
                write_records(out, &rows, format)?;
            }
        }
    }

    info!("Scenario complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariff_engine::{AggregatedResultRecord, ScenarioResultRecord};
    use tempfile::NamedTempFile;

    fn parts_file() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "part_id,description,commodity,source_country,unit_cost,tariff_rate_pct,\
             warehouse_cost_per_unit,indirect_cost_per_unit,inventory_position,baseline_total_cost"
        )
        .unwrap();
        writeln!(file, "P1,Motor housing,Steel,China,12.5,20,0.25,0.5,100,1550").unwrap();
        writeln!(file, "P2,Bracket,Steel,China,2,20,0,0,50,120").unwrap();
        writeln!(file, "P3,Fastener,,Mexico,0.1,0,0,0,10000,1000").unwrap();
        file
    }

    fn args(file: &NamedTempFile) -> ScenarioArgs {
        ScenarioArgs {
            parts: file.path().display().to_string(),
            format: Some("json".to_string()),
            ..Default::default()
        }
    }

    fn run_to_string(config: &TariffScopeConfig, args: &ScenarioArgs) -> Result<String> {
        let mut buf = Vec::new();
        execute(config, args, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(
            parse_override("China=45").unwrap(),
            ("China".to_string(), 45.0)
        );
        assert_eq!(
            parse_override(" Viet Nam = 12.5 ").unwrap(),
            ("Viet Nam".to_string(), 12.5)
        );
        assert!(parse_override("China").is_err());
        assert!(parse_override("=10").is_err());
        assert!(parse_override("China=high").is_err());
    }

    #[test]
    fn test_cli_overrides_win_over_config() {
        let mut config = TariffScopeConfig::default();
        config.overrides.insert("China".to_string(), 30.0);
        config.overrides.insert("Mexico".to_string(), 5.0);

        let merged = resolve_overrides(&config, &["China=60".to_string()]).unwrap();
        assert_eq!(merged.get("China").unwrap().pct(), 60.0);
        assert_eq!(merged.get("Mexico").unwrap().pct(), 5.0);
    }

    #[test]
    fn test_out_of_range_override_rejected() {
        let config = TariffScopeConfig::default();
        let err = resolve_overrides(&config, &["China=150".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
    }

    #[test]
    fn test_scenario_json_rows() {
        let file = parts_file();
        let mut args = args(&file);
        args.overrides = vec!["China=50".to_string()];

        let text = run_to_string(&TariffScopeConfig::default(), &args).unwrap();
        let rows: Vec<ScenarioResultRecord> = serde_json::from_str(&text).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].scenario_tariff_rate_pct, 50.0);
        assert!((rows[0].scenario_total_cost - 1950.0).abs() < 1e-9);
        assert_eq!(rows[2].delta_amount, 0.0);
    }

    #[test]
    fn test_grouping_by_missing_commodity_fails() {
        let file = parts_file();
        let mut args = args(&file);
        args.group_by = Some("commodity".to_string());

        let err = run_to_string(&TariffScopeConfig::default(), &args).unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
    }

    #[test]
    fn test_scenario_grouped_by_part_name() {
        let file = parts_file();
        let mut args = args(&file);
        args.group_by = Some("part_name".to_string());

        let text = run_to_string(&TariffScopeConfig::default(), &args).unwrap();
        let rows: Vec<AggregatedResultRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].group_value, "Motor housing");
    }

    #[test]
    fn test_scenario_table_output() {
        let file = parts_file();
        let mut args = args(&file);
        args.format = None;

        let text = run_to_string(&TariffScopeConfig::default(), &args).unwrap();
        assert!(text.starts_with("Label"));
        assert!(text.contains("Rows: 3"));
    }

    #[test]
    fn test_unknown_group_key() {
        let file = parts_file();
        let mut args = args(&file);
        args.group_by = Some("supplier".to_string());
        assert!(run_to_string(&TariffScopeConfig::default(), &args).is_err());
    }

    #[test]
    fn test_missing_parts_file() {
        let args = ScenarioArgs {
            parts: "does/not/exist.csv".to_string(),
            ..Default::default()
        };
        let err = run_to_string(&TariffScopeConfig::default(), &args).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }
}
