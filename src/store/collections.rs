//! Cached collections and optimistic mutations
//!
//! Reads are cache-aside: a warm cache is returned as-is, a cold one is
//! filled from the remote. Mutations read the full collection, change it and
//! write it back whole.
//!
//! There is no version check between the read and the write. Two mutations
//! of the same collection that overlap in time race, and the one that
//! finishes last overwrites the other's change (last writer wins).

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use crate::bus::topics;
use crate::config::RemoteConfig;
use crate::models::{Club, EntityId, Event, UpdateEventRequest};
use crate::storage::keys;
use crate::utils::errors::{CampusError, Result};
use crate::utils::logging::log_event_action;
use super::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Events,
    Clubs,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Events => "events",
            Collection::Clubs => "clubs",
        }
    }

    pub fn cache_key(&self) -> &'static str {
        match self {
            Collection::Events => keys::EVENTS_CACHE,
            Collection::Clubs => keys::CLUBS_CACHE,
        }
    }

    pub fn changed_topic(&self) -> &'static str {
        match self {
            Collection::Events => topics::EVENTS_CHANGED,
            Collection::Clubs => topics::CLUBS_CHANGED,
        }
    }

    /// Canonical remote resource for this collection
    pub fn resource<'a>(&self, config: &'a RemoteConfig) -> &'a str {
        match self {
            Collection::Events => &config.events_resource,
            Collection::Clubs => &config.clubs_resource,
        }
    }
}

/// A record stored in one of the cached collections
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &EntityId;
    fn set_id(&mut self, id: EntityId);
}

impl Entity for Event {
    const COLLECTION: Collection = Collection::Events;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl Entity for Club {
    const COLLECTION: Collection = Collection::Clubs;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

fn not_found(collection: Collection, id: &EntityId) -> CampusError {
    CampusError::EntityNotFound {
        collection: collection.name().to_string(),
        id: id.to_string(),
    }
}

/// Shallow-merge `patch` over `existing`. The id is never changed by a patch.
fn merge_record<E: Entity>(existing: &E, patch: &impl Serialize) -> Result<E> {
    let Value::Object(fields) = serde_json::to_value(patch)? else {
        return Err(CampusError::InvalidInput("update must be a JSON object".to_string()));
    };

    let mut merged = serde_json::to_value(existing)?;
    if let Value::Object(ref mut target) = merged {
        for (field, value) in fields {
            if field != "id" {
                target.insert(field, value);
            }
        }
    }

    serde_json::from_value(merged).map_err(|e| {
        CampusError::InvalidInput(format!("update produces an invalid {} record: {}", E::COLLECTION.name(), e))
    })
}

impl DataStore {
    /// Cached collection, fetched from the remote on a miss or when
    /// `force_refresh` is set. Fetch failures propagate unchanged.
    pub async fn get_collection<E: Entity>(&self, force_refresh: bool) -> Result<Vec<E>> {
        let collection = E::COLLECTION;

        if !force_refresh {
            if let Some(cached) = self.kv().get_opt::<Vec<E>>(collection.cache_key()) {
                debug!(collection = collection.name(), count = cached.len(), "Collection served from cache");
                return Ok(cached);
            }
        }

        let resource = collection.resource(&self.settings().remote);
        let document = self.remote().fetch_json(resource).await?;
        let records: Vec<E> = serde_json::from_value(document).map_err(|e| CampusError::ResourceNotFound {
            resource: resource.to_string(),
            reason: e.to_string(),
        })?;

        self.kv().set(collection.cache_key(), &records)?;
        info!(collection = collection.name(), count = records.len(), force_refresh, "Collection fetched and cached");
        Ok(records)
    }

    /// Write the whole collection and announce it
    pub fn save_collection<E: Entity>(&self, records: &[E]) -> Result<()> {
        let collection = E::COLLECTION;
        let payload = serde_json::to_value(records)?;

        self.kv().set(collection.cache_key(), &payload)?;
        self.bus().emit(collection.changed_topic(), &payload);
        Ok(())
    }

    /// Assign the next id, prepend the record and persist
    pub async fn create_entity<E: Entity>(&self, mut record: E) -> Result<E> {
        self.remote().delay().await;

        let mut records = self.get_collection::<E>(false).await?;
        let id = EntityId::next_after(records.iter().map(|record| record.id()))?;
        record.set_id(id);
        records.insert(0, record.clone());

        self.save_collection(&records)?;
        debug!(collection = E::COLLECTION.name(), id = %record.id(), "Record created");
        Ok(record)
    }

    /// Shallow-merge `patch` over the record with `id`
    pub async fn update_entity<E: Entity>(&self, id: impl Into<EntityId>, patch: &impl Serialize) -> Result<E> {
        let id = id.into();
        self.remote().delay().await;

        let mut records = self.get_collection::<E>(false).await?;
        let index = records
            .iter()
            .position(|record| record.id() == &id)
            .ok_or_else(|| not_found(E::COLLECTION, &id))?;

        let merged = merge_record(&records[index], patch)?;
        records[index] = merged.clone();

        self.save_collection(&records)?;
        debug!(collection = E::COLLECTION.name(), id = %id, "Record updated");
        Ok(merged)
    }

    pub async fn delete_entity<E: Entity>(&self, id: impl Into<EntityId>) -> Result<()> {
        let id = id.into();
        self.remote().delay().await;

        let mut records = self.get_collection::<E>(false).await?;
        let before = records.len();
        records.retain(|record| record.id() != &id);

        if records.len() == before {
            return Err(not_found(E::COLLECTION, &id));
        }

        self.save_collection(&records)?;
        debug!(collection = E::COLLECTION.name(), id = %id, "Record deleted");
        Ok(())
    }

    pub async fn get_events(&self, force_refresh: bool) -> Result<Vec<Event>> {
        self.get_collection(force_refresh).await
    }

    pub async fn get_clubs(&self, force_refresh: bool) -> Result<Vec<Club>> {
        self.get_collection(force_refresh).await
    }

    pub fn save_events(&self, events: &[Event]) -> Result<()> {
        self.save_collection(events)
    }

    pub async fn find_event(&self, id: impl Into<EntityId>) -> Result<Event> {
        let id = id.into();
        self.get_events(false)
            .await?
            .into_iter()
            .find(|event| event.id == id)
            .ok_or_else(|| not_found(Collection::Events, &id))
    }

    pub async fn create_event(&self, event: Event) -> Result<Event> {
        let created = self.create_entity(event).await?;
        log_event_action(created.id.as_str(), "create", None, Some(&created.title));
        Ok(created)
    }

    pub async fn update_event(&self, id: impl Into<EntityId>, update: &UpdateEventRequest) -> Result<Event> {
        let updated: Event = self.update_entity(id, update).await?;
        log_event_action(updated.id.as_str(), "update", None, None);
        Ok(updated)
    }

    pub async fn delete_event(&self, id: impl Into<EntityId>) -> Result<()> {
        let id = id.into();
        self.delete_entity::<Event>(&id).await?;
        log_event_action(id.as_str(), "delete", None, None);
        Ok(())
    }
}
