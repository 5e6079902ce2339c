//! Services module
//!
//! Page-level workflows built on top of the data store

pub mod admin;
pub mod catalog;
pub mod club;
pub mod profile;
pub mod registration;

// Re-export commonly used services
pub use admin::{AdminService, AdminStats};
pub use catalog::{CatalogService, CatalogStats, ClubFilters, EventCard, EventFilters, Page, SortOrder, StatusFilter};
pub use club::{ClubDashboardStats, ClubService, EventTemplate};
pub use profile::ProfileService;
pub use registration::RegistrationService;

use crate::storage::keys;
use crate::store::DataStore;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub catalog_service: CatalogService,
    pub registration_service: RegistrationService,
    pub admin_service: AdminService,
    pub club_service: ClubService,
    pub profile_service: ProfileService,
}

impl ServiceFactory {
    /// Create every service over one shared store
    pub fn new(store: DataStore) -> Self {
        Self {
            catalog_service: CatalogService::new(store.clone()),
            registration_service: RegistrationService::new(store.clone()),
            admin_service: AdminService::new(store.clone()),
            club_service: ClubService::new(store.clone()),
            profile_service: ProfileService::new(store),
        }
    }
}

/// Readiness of the cached data the services rely on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceHealthStatus {
    pub events_cached: bool,
    pub clubs_cached: bool,
    pub session_active: bool,
}

impl ServiceHealthStatus {
    pub fn check(store: &DataStore) -> Self {
        Self {
            events_cached: store.kv().contains(keys::EVENTS_CACHE),
            clubs_cached: store.kv().contains(keys::CLUBS_CACHE),
            session_active: store.current_user().is_some(),
        }
    }

    /// Both collections are warm
    pub fn is_healthy(&self) -> bool {
        self.events_cached && self.clubs_cached
    }

    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.events_cached {
            issues.push("Events collection not cached".to_string());
        }
        if !self.clubs_cached {
            issues.push("Clubs collection not cached".to_string());
        }

        issues
    }
}
