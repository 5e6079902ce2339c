//! Test context for unified test setup
//!
//! Builds a file-backed store in a temporary directory, an instant remote over
//! static documents, and a recorder for everything published on the bus.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;
use serde_json::Value;
use tempfile::TempDir;
use campus_connect::{
    bus::{topics, EventBus, MemorySink},
    config::Settings,
    remote::{SimulatedRemote, StaticSource},
    state::AppContext,
    storage::{FileBackend, KeyValueStore},
    store::DataStore,
};

use super::test_data::{clubs_fixture, events_fixture};

/// Everything published on the recorded topics, in order
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<(String, Value)>>>,
}

impl EventLog {
    pub fn attach(bus: &EventBus, topics: &[&str]) -> Self {
        let log = Self::default();
        for topic in topics {
            let entries = log.entries.clone();
            let name = topic.to_string();
            bus.on(*topic, move |payload| {
                entries.lock().unwrap().push((name.clone(), payload.clone()));
                Ok(())
            });
        }
        log
    }

    pub fn count(&self, topic: &str) -> usize {
        self.entries.lock().unwrap().iter().filter(|(t, _)| t == topic).count()
    }

    pub fn payloads(&self, topic: &str) -> Vec<Value> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == topic)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    pub fn last(&self, topic: &str) -> Option<Value> {
        self.payloads(topic).pop()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// Configuration for test context setup
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub events: Value,
    pub clubs: Value,
    pub latency: Duration,
    pub failure_probability: f64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            events: events_fixture(),
            clubs: clubs_fixture(),
            latency: Duration::ZERO,
            failure_probability: 0.0,
        }
    }
}

/// Unified test context that manages all test components
pub struct TestContext {
    pub app: AppContext,
    pub store: DataStore,
    pub log: EventLog,
    pub sink: Arc<MemorySink>,
    pub settings: Settings,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::new_with_config(TestConfig::default())
    }

    pub fn new_with_config(config: TestConfig) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut settings = Settings::instant();
        settings.storage.path = Some(temp_dir.path().join("storage.json").display().to_string());
        settings.remote.latency_ms = config.latency.as_millis() as u64;
        settings.remote.failure_probability = config.failure_probability;

        let backend = FileBackend::open(temp_dir.path().join("storage.json")).expect("Failed to open storage");
        let sink = Arc::new(MemorySink::new());
        let bus = EventBus::with_sink(sink.clone());
        let log = EventLog::attach(
            &bus,
            &[
                topics::LOADING_START,
                topics::LOADING_END,
                topics::USER_CHANGED,
                topics::THEME_CHANGED,
                topics::NOTIFICATIONS_CHANGED,
                topics::EVENTS_CHANGED,
                topics::CLUBS_CHANGED,
                topics::REGISTRATIONS_CHANGED,
                topics::CLUB_JOIN_REQUESTED,
                "filters:events",
            ],
        );

        let source = StaticSource::new()
            .with(settings.remote.events_resource.clone(), config.events)
            .with(settings.remote.clubs_resource.clone(), config.clubs);
        let remote = SimulatedRemote::new(Arc::new(source), bus.clone(), &settings.remote);

        let store = DataStore::new(KeyValueStore::new(Arc::new(backend)), bus, remote, settings.clone());
        let app = AppContext::new(store.clone());

        Self {
            app,
            store,
            log,
            sink,
            settings,
            temp_dir,
        }
    }

    /// Fetch both collections so later reads hit the cache
    pub async fn warm(&self) {
        self.app.warm_up(false).await.expect("Failed to warm caches");
        self.log.clear();
    }

    /// Reopen the storage file from disk, as a new browser session would
    pub fn reopen_storage(&self) -> KeyValueStore {
        let backend = FileBackend::open(self.temp_dir.path().join("storage.json")).expect("Failed to reopen storage");
        KeyValueStore::new(Arc::new(backend))
    }
}
