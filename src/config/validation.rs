use crate::config::types::{Config, ProbeConfig, ReportConfig};
use crate::ConfigError;
use crate::checker::build_header_map;
use reqwest::header::HeaderValue;
use std::collections::BTreeMap;

/// Upper bound for the per-request timeout (seconds)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_probe_config(&config.probe)?;
    validate_headers(&config.headers)?;
    validate_report_config(&config.report)?;
    Ok(())
}

/// Validates probe configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    HeaderValue::from_str(&config.user_agent).map_err(|_| {
        ConfigError::InvalidHeader(format!(
            "user-agent '{}' is not a valid header value",
            config.user_agent
        ))
    })?;

    Ok(())
}

/// Validates that every configured header can be sent as-is
pub fn validate_headers(headers: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    build_header_map(headers).map(|_| ())
}

/// Validates report configuration
fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if let Some(path) = &config.path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "report path cannot be empty".to_string(),
            ));
        }
    }
    Ok(())
}
