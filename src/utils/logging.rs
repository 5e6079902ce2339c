//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Campus Connect data layer.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{CampusError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file appender on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| CampusError::Config(format!("Invalid log filter: {}", e)))?;

    let (text_file, json_file, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "campus-connect.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            if config.json {
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking);
                (None, Some(layer), Some(guard))
            } else {
                let layer = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking);
                (Some(layer), None, Some(guard))
            }
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(text_file)
        .with(json_file)
        .try_init()
        .map_err(|e| CampusError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(username: &str, action: &str, details: Option<&str>) {
    info!(
        username = username,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log event management actions
pub fn log_event_action(event_id: &str, action: &str, username: Option<&str>, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        username = username,
        details = details,
        "Event action performed"
    );
}

/// Log admin actions
pub fn log_admin_action(admin: &str, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin = admin,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log key-value storage operations
pub fn log_storage_operation(operation: &str, key: &str, bytes: usize, success: bool) {
    if success {
        debug!(
            operation = operation,
            key = key,
            bytes = bytes,
            "Storage operation completed"
        );
    } else {
        error!(
            operation = operation,
            key = key,
            "Storage operation failed"
        );
    }
}

/// Log a subscriber failure reported by the event bus
pub fn log_bus_failure(topic: &str, handler_id: u64, reason: &str) {
    warn!(
        topic = topic,
        handler_id = handler_id,
        reason = reason,
        "Event bus handler failed"
    );
}
