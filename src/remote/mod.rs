//! Simulated remote backend
//!
//! Wraps a [`ResourceSource`] with artificial latency and a fixed chance of
//! transient failure, and brackets every fetch with `loading:start` /
//! `loading:end` so loading indicators stay balanced.

pub mod source;

use std::sync::Arc;
use std::time::Duration;
use rand::Rng;
use serde_json::{json, Value};
use tracing::{debug, warn};
use crate::bus::{topics, EventBus};
use crate::config::RemoteConfig;
use crate::utils::errors::{CampusError, Result};

pub use source::{FixtureSource, HttpSource, ResourceSource, StaticSource};

/// Emits `loading:end` exactly once when dropped, whichever way the fetch ends
struct LoadingGuard<'a> {
    bus: &'a EventBus,
    key: &'a str,
}

impl<'a> LoadingGuard<'a> {
    fn start(bus: &'a EventBus, key: &'a str) -> Self {
        bus.emit(topics::LOADING_START, &json!({ "key": key }));
        Self { bus, key }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.bus.emit(topics::LOADING_END, &json!({ "key": self.key }));
    }
}

#[derive(Clone)]
pub struct SimulatedRemote {
    source: Arc<dyn ResourceSource>,
    bus: EventBus,
    latency: Duration,
    failure_probability: f64,
}

impl SimulatedRemote {
    pub fn new(source: Arc<dyn ResourceSource>, bus: EventBus, config: &RemoteConfig) -> Self {
        Self::with_behavior(source, bus, config.latency(), config.failure_probability)
    }

    pub fn with_behavior(
        source: Arc<dyn ResourceSource>,
        bus: EventBus,
        latency: Duration,
        failure_probability: f64,
    ) -> Self {
        Self {
            source,
            bus,
            latency,
            failure_probability: failure_probability.clamp(0.0, 1.0),
        }
    }

    /// Build the source described by the configuration: HTTP when a base URL
    /// is set, the fixtures directory otherwise
    pub fn from_config(bus: EventBus, config: &RemoteConfig) -> Result<Self> {
        let source: Arc<dyn ResourceSource> = match config.base_url {
            Some(ref base_url) => Arc::new(HttpSource::new(base_url)?),
            None => Arc::new(FixtureSource::new(&config.fixtures_dir)),
        };
        Ok(Self::new(source, bus, config))
    }

    pub async fn fetch_json(&self, resource: &str) -> Result<Value> {
        let _loading = LoadingGuard::start(&self.bus, resource);

        if self.roll_failure() {
            warn!(resource = %resource, "Simulated network failure");
            return Err(CampusError::Network(format!(
                "please try again (simulated failure loading {})",
                resource
            )));
        }

        let document = self.source.read(resource).await?;
        self.delay().await;

        debug!(resource = %resource, "Resource fetched");
        Ok(document)
    }

    /// Artificial round-trip latency, also applied before writes
    pub async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn roll_failure(&self) -> bool {
        self.failure_probability > 0.0 && rand::thread_rng().gen_bool(self.failure_probability)
    }
}

impl std::fmt::Debug for SimulatedRemote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedRemote")
            .field("latency", &self.latency)
            .field("failure_probability", &self.failure_probability)
            .finish_non_exhaustive()
    }
}
