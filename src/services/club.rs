//! Club dashboard and membership requests

use std::collections::BTreeSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use crate::bus::topics;
use crate::models::{ApprovalStatus, ClubJoinRequest, EntityId, Event, EventDraft};
use crate::storage::keys;
use crate::store::DataStore;
use crate::utils::errors::{CampusError, Result};
use crate::utils::logging::{log_event_action, log_user_action};

pub const UPCOMING_LIMIT: usize = 6;
const FALLBACK_USERNAME: &str = "Student";
const DEFAULT_EVENT_IMAGE: &str =
    "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?w=400&h=250&fit=crop";
const DEFAULT_CLUB_LOGO: &str =
    "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?w=80&h=80&fit=crop";

/// Starting points offered on the event creation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTemplate {
    Workshop,
    Competition,
    Seminar,
    Social,
    Custom,
}

impl EventTemplate {
    pub fn draft(self) -> EventDraft {
        let (title, category, duration, difficulty, description, price) = match self {
            EventTemplate::Workshop => (
                "Workshop Title",
                "Technology",
                "4 Hours",
                "Intermediate",
                "Join us for an interactive workshop where you'll learn hands-on skills and techniques.",
                500,
            ),
            EventTemplate::Competition => (
                "Competition Name",
                "Technology",
                "6 Hours",
                "Advanced",
                "Compete with fellow students in this exciting competition.",
                300,
            ),
            EventTemplate::Seminar => (
                "Seminar Topic",
                "Academic",
                "2 Hours",
                "All Levels",
                "Attend an informative seminar featuring expert speakers.",
                200,
            ),
            EventTemplate::Social => (
                "Social Event",
                "Cultural",
                "3 Hours",
                "All Levels",
                "Connect with fellow students in a relaxed social setting.",
                100,
            ),
            EventTemplate::Custom => return EventDraft::default(),
        };

        EventDraft {
            title: title.to_string(),
            category: category.to_string(),
            duration: duration.to_string(),
            difficulty: difficulty.to_string(),
            description: description.to_string(),
            price,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClubDashboardStats {
    pub total_events: usize,
    pub pending_events: usize,
    pub approved_events: usize,
    pub registrations: usize,
}

/// Only the part of a stored registration the dashboard needs
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationRef {
    event_id: EntityId,
}

fn validate_draft(draft: &EventDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(CampusError::InvalidInput("event title is required".to_string()));
    }
    if draft.date.trim().is_empty() {
        return Err(CampusError::InvalidInput("event date is required".to_string()));
    }
    if draft.location.trim().is_empty() {
        return Err(CampusError::InvalidInput("event location is required".to_string()));
    }
    if draft.max_participants == 0 {
        return Err(CampusError::InvalidInput("maximum participants must be positive".to_string()));
    }
    Ok(())
}

/// Combine the form's separate date and time inputs into one timestamp
fn combine_date_time(date: &str, time: &str) -> String {
    let (date, time) = (date.trim(), time.trim());
    if date.contains('T') || time.is_empty() {
        date.to_string()
    } else {
        format!("{}T{}:00", date, time)
    }
}

#[derive(Debug, Clone)]
pub struct ClubService {
    store: DataStore,
}

impl ClubService {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Create a pending event owned by `club_name`
    pub async fn submit_event(&self, club_name: &str, draft: EventDraft) -> Result<Event> {
        validate_draft(&draft)?;

        let clubs = self.store.get_clubs(false).await?;
        let club_logo = clubs
            .iter()
            .find(|club| club.name == club_name && !club.logo.is_empty())
            .map(|club| club.logo.clone())
            .unwrap_or_else(|| DEFAULT_CLUB_LOGO.to_string());

        let event = Event {
            id: EntityId::default(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            image: draft
                .image
                .filter(|image| !image.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EVENT_IMAGE.to_string()),
            club_name: club_name.to_string(),
            club_logo,
            date: combine_date_time(&draft.date, &draft.time),
            time: draft.time,
            location: draft.location.trim().to_string(),
            approval_status: ApprovalStatus::Pending,
            max_participants: draft.max_participants,
            current_participants: 0,
            category: draft.category,
            difficulty: draft.difficulty,
            duration: draft.duration,
            price: draft.price,
        };

        let created = self.store.create_event(event).await?;
        log_event_action(created.id.as_str(), "submit", Some(club_name), Some(&created.title));
        Ok(created)
    }

    pub async fn events_for_club(&self, club_name: &str) -> Result<Vec<Event>> {
        Ok(self
            .store
            .get_events(false)
            .await?
            .into_iter()
            .filter(|event| event.club_name == club_name)
            .collect())
    }

    pub async fn dashboard_stats(&self, club_name: &str) -> Result<ClubDashboardStats> {
        let events = self.events_for_club(club_name).await?;
        let event_ids: BTreeSet<&EntityId> = events.iter().map(|event| &event.id).collect();

        let registrations: Vec<RegistrationRef> = self.store.kv().get(keys::EVENT_REGISTRATIONS, Vec::new());
        let count = |status: ApprovalStatus| events.iter().filter(|event| event.approval_status == status).count();

        Ok(ClubDashboardStats {
            total_events: events.len(),
            pending_events: count(ApprovalStatus::Pending),
            approved_events: count(ApprovalStatus::Approved),
            registrations: registrations
                .iter()
                .filter(|registration| event_ids.contains(&registration.event_id))
                .count(),
        })
    }

    /// Approved events still ahead of `now`, across every club
    pub async fn upcoming_approved(&self, now: DateTime<Utc>, limit: usize) -> Result<Vec<Event>> {
        Ok(self
            .store
            .get_events(false)
            .await?
            .into_iter()
            .filter(|event| event.approval_status == ApprovalStatus::Approved)
            .filter(|event| event.starts_at().is_some_and(|start| start > now))
            .take(limit)
            .collect())
    }

    pub async fn delete_event(&self, event_id: impl Into<EntityId>) -> Result<()> {
        self.store.delete_event(event_id).await
    }

    pub async fn request_join(&self, club_id: impl Into<EntityId>) -> Result<ClubJoinRequest> {
        let club_id = club_id.into();
        let club = self
            .store
            .get_clubs(false)
            .await?
            .into_iter()
            .find(|club| club.id == club_id)
            .ok_or_else(|| CampusError::EntityNotFound {
                collection: "clubs".to_string(),
                id: club_id.to_string(),
            })?;

        let username = self
            .store
            .current_user()
            .map(|user| user.username)
            .unwrap_or_else(|| FALLBACK_USERNAME.to_string());

        let mut requests: Vec<ClubJoinRequest> = self.store.kv().get(keys::CLUB_JOIN_REQUESTS, Vec::new());
        if requests.iter().any(|r| r.club_id == club_id && r.username == username) {
            warn!(club_id = %club_id, username = %username, "Duplicate join request");
            return Err(CampusError::AlreadyRequested {
                club_id: club_id.to_string(),
                username,
            });
        }

        let request = ClubJoinRequest {
            club_id: club.id.clone(),
            club_name: club.name.clone(),
            username: username.clone(),
            requested_at: Utc::now(),
        };
        requests.push(request.clone());
        self.store.kv().set(keys::CLUB_JOIN_REQUESTS, &requests)?;

        let mut joined = self.joined_clubs();
        joined.insert(club.id.clone());
        self.store.kv().set(keys::JOINED_CLUBS, &joined)?;

        self.store.bus().emit(
            topics::CLUB_JOIN_REQUESTED,
            &json!({ "clubId": club.id, "clubName": club.name, "username": username }),
        );
        log_user_action(&username, "request_join", Some(&club.name));
        info!(club_id = %club_id, "Join request recorded");

        Ok(request)
    }

    /// Clubs the user asked to join, as canonical ids
    pub fn joined_clubs(&self) -> BTreeSet<EntityId> {
        self.store.kv().get(keys::JOINED_CLUBS, BTreeSet::new())
    }
}
