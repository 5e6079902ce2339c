//! Canonical record identifier
//!
//! Fixtures carry numeric ids while some browser-side records carry strings.
//! Both normalize to one string form on read, so equality is plain string
//! equality everywhere else.

use serde::{Deserialize, Deserializer, Serialize};
use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(number) => EntityId::from_number(&number),
            RawId::Text(text) => EntityId::new(text),
        })
    }
}

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    fn from_number(number: &serde_json::Number) -> Self {
        match (number.as_u64(), number.as_i64(), number.as_f64()) {
            (Some(n), _, _) => Self(n.to_string()),
            (None, Some(n), _) => Self(n.to_string()),
            // Integral floats inside the i64 range; anything wider keeps its JSON text
            (None, None, Some(f)) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Self(format!("{}", f as i64))
            }
            _ => Self(number.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value, when the id is a non-negative integer
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// One more than the largest numeric id; non-numeric ids count as zero.
    /// Fails once `u64::MAX` is taken.
    pub fn next_after<'a>(ids: impl IntoIterator<Item = &'a EntityId>) -> Result<EntityId> {
        let max = ids
            .into_iter()
            .map(|id| id.numeric().unwrap_or(0))
            .max()
            .unwrap_or(0);

        max.checked_add(1)
            .map(EntityId::from)
            .ok_or_else(|| CampusError::InvalidInput("identifier space exhausted".to_string()))
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&EntityId> for EntityId {
    fn from(id: &EntityId) -> Self {
        id.clone()
    }
}
