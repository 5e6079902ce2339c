//! Campus Connect
//!
//! Client-side data layer for a campus events portal: a typed key-value store,
//! a synchronous publish/subscribe bus, a simulated remote backend, and the
//! cache-aside data store with the page-level services built on top of it.

pub mod bus;
pub mod config;
pub mod models;
pub mod remote;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CampusError, Result};

// Re-export main components for easy access
pub use bus::EventBus;
pub use remote::SimulatedRemote;
pub use services::ServiceFactory;
pub use state::AppContext;
pub use storage::KeyValueStore;
pub use store::DataStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
