//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use super::id::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub club_name: String,
    #[serde(default)]
    pub club_logo: String,
    /// ISO-8601 start, with or without an offset
    pub date: String,
    /// Display time, e.g. "2:00 PM"
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(alias = "status", default)]
    pub approval_status: ApprovalStatus,
    #[serde(default)]
    pub max_participants: u32,
    #[serde(default)]
    pub current_participants: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub price: u32,
}

/// Admin workflow state
///
/// Listing fixtures reuse the `status` field for `upcoming`/`past`; anything
/// outside the workflow vocabulary reads as approved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ApprovalStatus {
    Pending,
    #[default]
    Approved,
    Rejected,
}

impl From<String> for ApprovalStatus {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => ApprovalStatus::Pending,
            "rejected" => ApprovalStatus::Rejected,
            _ => ApprovalStatus::Approved,
        }
    }
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

/// Listing view state, derived from the clock and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalStatus {
    Upcoming,
    Past,
}

impl Event {
    /// Start time; naive timestamps are read as UTC
    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }

        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(|naive| naive.and_utc())
    }

    /// Unparseable dates count as past
    pub fn temporal_status(&self, now: DateTime<Utc>) -> TemporalStatus {
        match self.starts_at() {
            Some(start) if start > now => TemporalStatus::Upcoming,
            _ => TemporalStatus::Past,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }

    pub fn spots_left(&self) -> u32 {
        self.max_participants.saturating_sub(self.current_participants)
    }

    /// Fill ratio as a whole percentage
    pub fn fill_percent(&self) -> u32 {
        if self.max_participants == 0 {
            return 100;
        }
        ((self.current_participants as f64 / self.max_participants as f64) * 100.0).round() as u32
    }
}

/// Fields a club fills in when submitting an event for approval
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub date: String,
    pub time: String,
    pub location: String,
    pub max_participants: u32,
    pub category: String,
    pub difficulty: String,
    pub duration: String,
    pub price: u32,
}

/// Partial update, shallow-merged over the stored record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
}

impl UpdateEventRequest {
    pub fn status(status: ApprovalStatus) -> Self {
        Self {
            approval_status: Some(status),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixture_event() -> serde_json::Value {
        json!({
            "id": 16,
            "title": "New Tech Workshop",
            "description": "Advanced programming workshop",
            "clubName": "Technology Innovation Club",
            "date": "2025-06-15T14:00:00",
            "time": "2:00 PM",
            "location": "Computer Lab 3",
            "status": "pending",
            "maxParticipants": 30,
            "currentParticipants": 0,
            "category": "Technology",
            "difficulty": "Advanced",
            "duration": "6 Hours",
            "price": 800
        })
    }

    #[test]
    fn test_fixture_status_maps_to_approval() {
        let event: Event = serde_json::from_value(fixture_event()).unwrap();
        assert_eq!(event.id, EntityId::from(16));
        assert_eq!(event.approval_status, ApprovalStatus::Pending);

        let mut listing = fixture_event();
        listing["status"] = json!("upcoming");
        let event: Event = serde_json::from_value(listing).unwrap();
        assert_eq!(event.approval_status, ApprovalStatus::Approved);
    }

    #[test]
    fn test_serializes_approval_status_field() {
        let event: Event = serde_json::from_value(fixture_event()).unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["approvalStatus"], json!("pending"));
        assert!(value.get("status").is_none());
        assert_eq!(value["id"], json!("16"));
    }

    #[test]
    fn test_temporal_status() {
        let event: Event = serde_json::from_value(fixture_event()).unwrap();
        let before = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(event.temporal_status(before), TemporalStatus::Upcoming);
        assert_eq!(event.temporal_status(after), TemporalStatus::Past);

        let mut undated = event.clone();
        undated.date = "someday".to_string();
        assert_eq!(undated.temporal_status(before), TemporalStatus::Past);
    }

    #[test]
    fn test_starts_at_formats() {
        let mut event: Event = serde_json::from_value(fixture_event()).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 6, 15, 14, 0, 0).unwrap();
        assert_eq!(event.starts_at(), Some(expected));

        event.date = "2025-06-15T14:00:00Z".to_string();
        assert_eq!(event.starts_at(), Some(expected));

        event.date = "2025-06-15T14:00".to_string();
        assert_eq!(event.starts_at(), Some(expected));
    }

    #[test]
    fn test_capacity_helpers() {
        let mut event: Event = serde_json::from_value(fixture_event()).unwrap();
        assert!(!event.is_full());
        assert_eq!(event.spots_left(), 30);

        event.current_participants = 30;
        assert!(event.is_full());
        assert_eq!(event.fill_percent(), 100);
    }

    #[test]
    fn test_update_request_skips_unset_fields() {
        let patch = serde_json::to_value(UpdateEventRequest::status(ApprovalStatus::Rejected)).unwrap();
        assert_eq!(patch, json!({"approvalStatus": "rejected"}));
    }
}
