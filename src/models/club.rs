//! Club model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::id::EntityId;

/// A student club. Events reference clubs by `name`, not by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub founded_year: Option<u16>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub president: String,
    /// Contact email
    #[serde(default)]
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_count: Option<u32>,
}

/// A pending request from a student to join a club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubJoinRequest {
    pub club_id: EntityId,
    pub club_name: String,
    pub username: String,
    pub requested_at: DateTime<Utc>,
}
