//! Application context
//!
//! Everything a page controller needs, constructed once at startup and passed
//! in explicitly. Controllers never reach for ambient globals.

use std::sync::Arc;
use tracing::info;
use crate::config::Settings;
use crate::services::{
    AdminService, CatalogService, ClubService, ProfileService, RegistrationService, ServiceFactory,
    ServiceHealthStatus,
};
use crate::store::DataStore;
use crate::utils::errors::Result;

/// Application-wide context containing services and settings
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub store: DataStore,
    pub services: Arc<ServiceFactory>,
}

/// Sizes of the collections loaded by [`AppContext::warm_up`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmUpReport {
    pub events: usize,
    pub clubs: usize,
}

impl AppContext {
    pub fn new(store: DataStore) -> Self {
        let settings = store.settings().clone();
        let services = Arc::new(ServiceFactory::new(store.clone()));
        Self {
            settings,
            store,
            services,
        }
    }

    /// Build the store described by the settings, then the services on top
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let store = DataStore::from_settings(settings)?;
        Ok(Self::new(store))
    }

    /// Fill both collection caches concurrently
    pub async fn warm_up(&self, force_refresh: bool) -> Result<WarmUpReport> {
        let (events, clubs) = futures::try_join!(
            self.store.get_events(force_refresh),
            self.store.get_clubs(force_refresh)
        )?;

        info!(events = events.len(), clubs = clubs.len(), "Collections warmed");
        Ok(WarmUpReport {
            events: events.len(),
            clubs: clubs.len(),
        })
    }

    pub fn health(&self) -> ServiceHealthStatus {
        ServiceHealthStatus::check(&self.store)
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.services.catalog_service
    }

    pub fn registrations(&self) -> &RegistrationService {
        &self.services.registration_service
    }

    pub fn admin(&self) -> &AdminService {
        &self.services.admin_service
    }

    pub fn clubs(&self) -> &ClubService {
        &self.services.club_service
    }

    pub fn profiles(&self) -> &ProfileService {
        &self.services.profile_service
    }
}
