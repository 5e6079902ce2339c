//! Shared fixtures for unit tests

use std::sync::Arc;
use serde_json::json;
use crate::bus::EventBus;
use crate::config::Settings;
use crate::remote::{SimulatedRemote, StaticSource};
use crate::storage::KeyValueStore;
use crate::store::DataStore;

/// In-memory store with an instant remote serving two small collections
pub(crate) fn memory_store() -> DataStore {
    let settings = Settings::instant();
    let bus = EventBus::new();
    let source = StaticSource::new()
        .with(
            "events.json",
            json!([
                {"id": 1, "title": "AI Summit", "clubName": "Tech Club", "date": "2030-03-01T10:00:00", "maxParticipants": 2},
                {"id": 2, "title": "Chess Night", "clubName": "Chess Club", "date": "2020-08-01T18:00:00", "maxParticipants": 10}
            ]),
        )
        .with(
            "clubs.json",
            json!([
                {"id": 1, "name": "Tech Club", "logo": "tech.png"},
                {"id": 2, "name": "Chess Club"}
            ]),
        );
    let remote = SimulatedRemote::new(Arc::new(source), bus.clone(), &settings.remote);
    DataStore::new(KeyValueStore::in_memory(), bus, remote, settings)
}
