//! Check command implementation
//!
//! Validates the resolved configuration and prints it as TOML.

use std::io::Write;

use tracing::info;

use crate::config::TariffScopeConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &TariffScopeConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(config, &mut out)
}

/// Run the check command against any writer.
pub fn execute<W: Write>(config: &TariffScopeConfig, out: &mut W) -> Result<()> {
    config.validate()?;

    let rendered = toml::to_string_pretty(config)
        .map_err(|e| CliError::invalid_argument(format!("cannot render config: {}", e)))?;
    writeln!(out, "# resolved tariffscope configuration")?;
    write!(out, "{}", rendered)?;

    info!("Configuration OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_check_prints_resolved_config() {
        let mut config = TariffScopeConfig::default();
        config.overrides.insert("China".to_string(), 35.0);

        let mut buf = Vec::new();
        execute(&config, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let body = text.trim_start_matches("# resolved tariffscope configuration\n");
        let parsed: TariffScopeConfig = toml::from_str(body).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_check_reports_invalid_config() {
        let config = TariffScopeConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        let err = execute(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Validation(_))));
    }
}
