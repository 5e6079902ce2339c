//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CampusError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_remote_config(&settings.remote)?;
    validate_notifications_config(&settings.notifications)?;
    validate_catalog_config(&settings.catalog)?;
    validate_logging_config(&settings.logging)?;

    if let Some(ref path) = settings.storage.path {
        if path.trim().is_empty() {
            return Err(CampusError::Config(
                "Storage path must not be blank".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate simulated remote configuration
fn validate_remote_config(config: &super::RemoteConfig) -> Result<()> {
    if !(0.0..=1.0).contains(&config.failure_probability) {
        return Err(CampusError::Config(format!(
            "Failure probability must be within [0, 1], got {}",
            config.failure_probability
        )));
    }

    if config.events_resource.is_empty() || config.clubs_resource.is_empty() {
        return Err(CampusError::Config(
            "Events and clubs resource names are required".to_string()
        ));
    }

    match config.base_url {
        Some(ref base_url) => {
            url::Url::parse(base_url)?;
        }
        None if config.fixtures_dir.is_empty() => {
            return Err(CampusError::Config(
                "Either a fixtures directory or a base URL is required".to_string()
            ));
        }
        None => {}
    }

    Ok(())
}

/// Validate notification configuration
fn validate_notifications_config(config: &super::NotificationsConfig) -> Result<()> {
    if config.max_entries == 0 {
        return Err(CampusError::Config(
            "Notification list capacity must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate catalog configuration
fn validate_catalog_config(config: &super::CatalogConfig) -> Result<()> {
    if config.page_size == 0 {
        return Err(CampusError::Config(
            "Page size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CampusError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CampusError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
