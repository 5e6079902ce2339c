//! Event registration service
//!
//! Registrations are append-only. Signing up also bumps the event's
//! participant count through the regular update path, so listeners on
//! `events:changed` see the new count.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::json;
use tracing::{info, warn};
use crate::bus::topics;
use crate::models::{EntityId, Event, EventSnapshot, Participant, Registration, UpdateEventRequest};
use crate::storage::keys;
use crate::store::DataStore;
use crate::utils::errors::{CampusError, Result};
use crate::utils::helpers::generate_registration_id;
use crate::utils::logging::log_event_action;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[6-9]\d{9}$";
const NAME_PATTERN: &str = r"^[a-zA-Z\s]+$";

fn matches(pattern: &str, input: &str) -> Result<bool> {
    let regex = Regex::new(pattern)
        .map_err(|_| CampusError::Config("Invalid regex pattern".to_string()))?;
    Ok(regex.is_match(input))
}

/// Check the sign-up form; the first failing field is reported
pub fn validate_participant(participant: &Participant) -> Result<()> {
    let name = participant.full_name.trim();
    if name.chars().count() < 2 || !matches(NAME_PATTERN, name)? {
        return Err(CampusError::InvalidInput("full name must be at least 2 letters".to_string()));
    }
    if !matches(EMAIL_PATTERN, participant.email.trim())? {
        return Err(CampusError::InvalidInput("email address is not valid".to_string()));
    }
    if !matches(PHONE_PATTERN, participant.phone.trim())? {
        return Err(CampusError::InvalidInput("phone must be a 10 digit mobile number".to_string()));
    }
    if participant.roll_number.trim().chars().count() < 3 {
        return Err(CampusError::InvalidInput("roll number must be at least 3 characters".to_string()));
    }
    if participant.department.trim().is_empty() {
        return Err(CampusError::InvalidInput("department is required".to_string()));
    }
    if participant.year_of_study.trim().is_empty() {
        return Err(CampusError::InvalidInput("year of study is required".to_string()));
    }
    Ok(())
}

/// Plain-text ticket handed to the participant after signing up
pub fn ticket_text(registration: &Registration) -> String {
    format!(
        "CAMPUS CONNECT - EVENT TICKET\n\
         ============================\n\
         \n\
         Registration ID: {}\n\
         Event: {}\n\
         Participant: {}\n\
         Date: {}\n\
         Time: {}\n\
         Location: {}\n\
         \n\
         Please bring this ticket to the event.\n",
        registration.id,
        registration.event_title,
        registration.participant.full_name,
        registration.event.date,
        registration.event.time,
        registration.event.location,
    )
}

pub fn ticket_file_name(registration: &Registration) -> String {
    format!("ticket-{}.txt", registration.id)
}

#[derive(Debug, Clone)]
pub struct RegistrationService {
    store: DataStore,
}

impl RegistrationService {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Event as shown on the sign-up page
    pub async fn event_for_signup(&self, event_id: impl Into<EntityId>) -> Result<Event> {
        self.store.find_event(event_id).await
    }

    pub async fn register(&self, event_id: impl Into<EntityId>, participant: Participant) -> Result<Registration> {
        let event_id = event_id.into();
        validate_participant(&participant)?;

        let event = self.store.find_event(&event_id).await?;
        if event.is_full() {
            warn!(event_id = %event_id, "Registration refused, event is full");
            return Err(CampusError::EventFull {
                event_id: event_id.to_string(),
            });
        }

        let registration = self.build(&event, participant, Utc::now());

        let mut registrations = self.list();
        registrations.push(registration.clone());
        self.store.kv().set(keys::EVENT_REGISTRATIONS, &registrations)?;

        let bump = UpdateEventRequest {
            current_participants: Some(event.current_participants + 1),
            ..Default::default()
        };
        self.store.update_event(&event_id, &bump).await?;

        self.store.bus().emit(
            topics::REGISTRATIONS_CHANGED,
            &json!({ "eventId": event_id, "registrationId": registration.id }),
        );
        log_event_action(event_id.as_str(), "register", None, Some(&registration.id));
        info!(event_id = %event_id, registration_id = %registration.id, "Participant registered");

        Ok(registration)
    }

    fn build(&self, event: &Event, participant: Participant, now: DateTime<Utc>) -> Registration {
        Registration {
            id: generate_registration_id(now),
            event_id: event.id.clone(),
            event_title: event.title.clone(),
            registration_date: now,
            participant,
            event: EventSnapshot::from(event),
        }
    }

    pub fn list(&self) -> Vec<Registration> {
        self.store.kv().get(keys::EVENT_REGISTRATIONS, Vec::new())
    }

    pub fn for_event(&self, event_id: impl Into<EntityId>) -> Vec<Registration> {
        let event_id = event_id.into();
        self.list()
            .into_iter()
            .filter(|registration| registration.event_id == event_id)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.list().len()
    }
}
