//! Per-page filter state
//!
//! Opaque key/value maps stored under `filters_<page>` so UI controls can be
//! restored after navigating away. Each write emits `filters:<page>`.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use crate::bus::topics;
use crate::storage::keys;
use crate::utils::errors::{CampusError, Result};
use super::DataStore;

pub type FilterState = Map<String, Value>;

impl DataStore {
    pub fn filter_state(&self, page: &str) -> Option<FilterState> {
        self.kv().get_opt(&keys::filters(page))
    }

    pub fn set_filter_state(&self, page: &str, state: &FilterState) -> Result<()> {
        self.kv().set(&keys::filters(page), state)?;
        self.bus().emit(&topics::filters(page), &Value::Object(state.clone()));
        Ok(())
    }

    pub fn clear_filter_state(&self, page: &str) -> Result<()> {
        self.kv().remove(&keys::filters(page))?;
        self.bus().emit(&topics::filters(page), &Value::Null);
        Ok(())
    }

    /// Filter state read into a typed struct; missing keys take the
    /// struct's own defaults
    pub fn typed_filters<T: DeserializeOwned + Default>(&self, page: &str) -> T {
        self.filter_state(page)
            .and_then(|state| serde_json::from_value(Value::Object(state)).ok())
            .unwrap_or_default()
    }

    pub fn set_typed_filters<T: Serialize>(&self, page: &str, filters: &T) -> Result<()> {
        match serde_json::to_value(filters)? {
            Value::Object(state) => self.set_filter_state(page, &state),
            _ => Err(CampusError::InvalidInput(format!("filters for {} must be an object", page))),
        }
    }
}
