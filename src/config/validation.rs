//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{ProjectHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_dev_server_config(&settings.dev_server)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ProjectHubError::Config(format!("{} is required", name)));
    }

    let url = Url::parse(value)
        .map_err(|e| ProjectHubError::Config(format!("{} is not a valid URL: {}", name, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ProjectHubError::Config(format!(
            "{} must use http or https, got {}",
            name,
            url.scheme()
        )));
    }

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    validate_http_url("API base URL", &config.base_url)?;
    validate_http_url("API server base URL", &config.server_base_url)?;

    if config.timeout_seconds == 0 {
        return Err(ProjectHubError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate dev server configuration
fn validate_dev_server_config(config: &super::DevServerConfig) -> Result<()> {
    if config.port == 0 || config.preview_port == 0 {
        return Err(ProjectHubError::Config(
            "Dev server ports must be greater than 0".to_string()
        ));
    }

    for (prefix, target) in &config.proxy {
        if !prefix.starts_with('/') {
            return Err(ProjectHubError::Config(
                format!("Proxy prefix must start with '/': {}", prefix)
            ));
        }
        validate_http_url(&format!("Proxy target for {}", prefix), target)?;
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ProjectHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ProjectHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
