//! Data store
//!
//! The single entry point page controllers use for domain data. It composes
//! the key-value store (persistence), the event bus (change notification)
//! and the simulated remote (source of truth for collections).
//!
//! Every write that changes a cached collection emits the matching
//! `<collection>:changed` topic synchronously, with no suspension point
//! between the write and the emit.

pub mod collections;
pub mod filters;
pub mod notifications;
pub mod session;

use std::sync::Arc;
use tracing::info;
use crate::bus::EventBus;
use crate::config::Settings;
use crate::remote::SimulatedRemote;
use crate::storage::{FileBackend, KeyValueStore, MemoryBackend, StorageBackend};
use crate::utils::errors::Result;

pub use collections::{Collection, Entity};
pub use filters::FilterState;
pub use notifications::Notifications;

struct StoreInner {
    kv: KeyValueStore,
    bus: EventBus,
    remote: SimulatedRemote,
    settings: Settings,
}

/// Cheaply cloneable handle to the shared store
#[derive(Clone)]
pub struct DataStore {
    inner: Arc<StoreInner>,
}

impl DataStore {
    pub fn new(kv: KeyValueStore, bus: EventBus, remote: SimulatedRemote, settings: Settings) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                kv,
                bus,
                remote,
                settings,
            }),
        }
    }

    /// Build the storage backend and remote described by `settings`
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let backend: Arc<dyn StorageBackend> = match settings.storage.path {
            Some(ref path) => {
                info!(path = %path, "Using file-backed storage");
                Arc::new(FileBackend::open(path)?)
            }
            None => {
                info!("Using in-memory storage");
                Arc::new(MemoryBackend::new())
            }
        };

        let bus = EventBus::new();
        let remote = SimulatedRemote::from_config(bus.clone(), &settings.remote)?;
        Ok(Self::new(KeyValueStore::new(backend), bus, remote, settings))
    }

    pub fn kv(&self) -> &KeyValueStore {
        &self.inner.kv
    }

    pub fn bus(&self) -> &EventBus {
        &self.inner.bus
    }

    pub fn remote(&self) -> &SimulatedRemote {
        &self.inner.remote
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(self)
    }
}

impl std::fmt::Debug for DataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("kv", &self.inner.kv)
            .field("bus", &self.inner.bus)
            .field("remote", &self.inner.remote)
            .finish_non_exhaustive()
    }
}
