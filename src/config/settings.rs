//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
    pub notifications: NotificationsConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Key-value storage configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON file backing the store; in-memory when absent
    pub path: Option<String>,
}

/// Simulated remote configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Fetch resources over HTTP relative to this URL instead of from disk
    pub base_url: Option<String>,
    pub fixtures_dir: String,
    pub events_resource: String,
    pub clubs_resource: String,
    pub latency_ms: u64,
    pub failure_probability: f64,
}

/// Notification list configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub max_entries: usize,
}

/// Event listing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub page_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when absent
    pub file_path: Option<String>,
    /// Write the log file as JSON lines
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CAMPUS").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CampusError> {
        super::validation::validate_settings(self)
    }

    /// Settings with no artificial latency or failures, used by tests and demos
    pub fn instant() -> Self {
        let mut settings = Self::default();
        settings.remote.latency_ms = 0;
        settings.remote.failure_probability = 0.0;
        settings
    }
}

impl RemoteConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            fixtures_dir: "data".to_string(),
            events_resource: "events.json".to_string(),
            clubs_resource: "clubs.json".to_string(),
            latency_ms: 350,
            failure_probability: 0.03,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { max_entries: 200 }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { page_size: 9 }
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
