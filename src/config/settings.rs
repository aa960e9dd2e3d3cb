//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub dev_server: DevServerConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin used by browser-side calls; `/api` on it is proxied to the backend
    pub base_url: String,
    /// Backend origin used by server-side page loaders
    pub server_base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Development and preview server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    pub host: String,
    pub port: u16,
    pub preview_port: u16,
    pub clear_screen: bool,
    /// Path prefix -> upstream origin
    pub proxy: BTreeMap<String, String>,
    /// Directory holding the built frontend
    pub static_dir: String,
}

/// Client session persistence configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// JSON file backing session storage; in-memory when unset
    pub storage_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("PROJECTHUB")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ProjectHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            dev_server: DevServerConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            server_base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 30,
            user_agent: format!("ProjectHub-Client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for DevServerConfig {
    fn default() -> Self {
        let mut proxy = BTreeMap::new();
        proxy.insert("/api".to_string(), "http://localhost:8000".to_string());

        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            preview_port: 3000,
            clear_screen: false,
            proxy,
            static_dir: "build".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}
