//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_report_format(config)?;
    validate_timeout(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_report_format(config: &Config) -> Result<()> {
    if let Some(format) = &config.report_format {
        if format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report_format".to_string(),
                message: "report format cannot be blank".to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn validate_timeout(config: &Config) -> Result<()> {
    if config.timeout_secs == Some(0) {
        return Err(ConfigError::InvalidValue {
            field: "timeout_secs".to_string(),
            message: "timeout must be at least one second".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIG_TEMPLATE;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_template_is_valid() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.report.as_deref(), Some("reports"));
        assert!(config.convert_report);
    }

    #[test]
    fn test_blank_report_format_rejected() {
        let config = Config {
            report_format: Some("  ".to_string()),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("report_format"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
