//! Error handling for Campus Connect
//!
//! This module defines the main error type used throughout the data layer
//! and provides a unified error handling strategy for page controllers.

use thiserror::Error;

/// Main error type for Campus Connect
#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Resource {resource} could not be loaded: {reason}")]
    ResourceNotFound { resource: String, reason: String },

    #[error("{collection} record not found: {id}")]
    EntityNotFound { collection: String, id: String },

    #[error("Event is full: {event_id}")]
    EventFull { event_id: String },

    #[error("User {username} already requested to join club {club_id}")]
    AlreadyRequested { club_id: String, username: String },

    #[error("No profile stored for {email}")]
    ProfileNotFound { email: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for Campus Connect operations
pub type Result<T> = std::result::Result<T, CampusError>;

impl CampusError {
    /// Check if the error is transient and worth a user-initiated retry
    pub fn is_recoverable(&self) -> bool {
        match self {
            CampusError::Network(_) => true,
            CampusError::Http(_) => true,
            CampusError::Io(_) => true,
            CampusError::ResourceNotFound { .. } => false,
            CampusError::EntityNotFound { .. } => false,
            CampusError::EventFull { .. } => false,
            CampusError::AlreadyRequested { .. } => false,
            CampusError::ProfileNotFound { .. } => false,
            CampusError::InvalidInput(_) => false,
            CampusError::Config(_) => false,
            CampusError::Serialization(_) => false,
            CampusError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CampusError::Config(_) => ErrorSeverity::Critical,
            CampusError::Network(_) | CampusError::Http(_) => ErrorSeverity::Warning,
            CampusError::EventFull { .. } => ErrorSeverity::Info,
            CampusError::AlreadyRequested { .. } => ErrorSeverity::Info,
            CampusError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Short message suitable for a transient notice in the UI
    pub fn user_message(&self) -> String {
        match self {
            CampusError::Network(_) | CampusError::Http(_) => {
                "Network error: please try again".to_string()
            }
            CampusError::EntityNotFound { .. } => "The requested item no longer exists".to_string(),
            CampusError::EventFull { .. } => "Sorry, this event is full".to_string(),
            CampusError::AlreadyRequested { .. } => {
                "You have already requested to join this club.".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
