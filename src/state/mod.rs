//! State management module
//!
//! This module holds the application context handed to page controllers

pub mod context;

// Re-export commonly used state components
pub use context::AppContext;
