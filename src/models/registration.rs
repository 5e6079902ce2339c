//! Registration model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::event::Event;
use super::id::EntityId;

/// An append-only record of a student signing up for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub event_id: EntityId,
    pub event_title: String,
    pub registration_date: DateTime<Utc>,
    pub participant: Participant,
    pub event: EventSnapshot,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub roll_number: String,
    pub department: String,
    pub year_of_study: String,
    #[serde(default)]
    pub additional_info: String,
}

/// Event fields as they were when the registration was made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub date: String,
    pub time: String,
    pub location: String,
    pub price: u32,
    pub club_name: String,
}

impl From<&Event> for EventSnapshot {
    fn from(event: &Event) -> Self {
        Self {
            date: event.date.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            price: event.price,
            club_name: event.club_name.clone(),
        }
    }
}
