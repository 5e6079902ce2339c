//! Admin approval workflow

use serde::Serialize;
use tracing::info;
use crate::models::{ApprovalStatus, EntityId, Event, NotificationDraft, NotificationKind, UpdateEventRequest};
use crate::storage::keys;
use crate::store::DataStore;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

const FALLBACK_ADMIN: &str = "admin";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    pub total_events: usize,
    pub pending_events: usize,
    pub approved_events: usize,
    pub rejected_events: usize,
    pub total_registrations: usize,
}

#[derive(Debug, Clone)]
pub struct AdminService {
    store: DataStore,
}

impl AdminService {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    pub async fn approve(&self, event_id: impl Into<EntityId>) -> Result<Event> {
        self.review(event_id.into(), ApprovalStatus::Approved).await
    }

    pub async fn reject(&self, event_id: impl Into<EntityId>) -> Result<Event> {
        self.review(event_id.into(), ApprovalStatus::Rejected).await
    }

    async fn review(&self, event_id: EntityId, status: ApprovalStatus) -> Result<Event> {
        let event = self
            .store
            .update_event(&event_id, &UpdateEventRequest::status(status))
            .await?;

        let admin = self
            .store
            .current_user()
            .map(|user| user.username)
            .unwrap_or_else(|| FALLBACK_ADMIN.to_string());
        log_admin_action(&admin, status.as_str(), Some(event_id.as_str()), Some(&event.title));

        let (title, kind) = match status {
            ApprovalStatus::Approved => ("Event approved", NotificationKind::Success),
            ApprovalStatus::Rejected => ("Event rejected", NotificationKind::Warning),
            ApprovalStatus::Pending => ("Event returned to review", NotificationKind::Info),
        };
        self.store.notifications().add(
            NotificationDraft::new(title, format!("Event \"{}\" has been {}", event.title, status.as_str()))
                .with_kind(kind),
        )?;

        info!(event_id = %event_id, status = status.as_str(), "Event reviewed");
        Ok(event)
    }

    /// Events awaiting review, in collection order
    pub async fn pending(&self) -> Result<Vec<Event>> {
        Ok(self
            .store
            .get_events(false)
            .await?
            .into_iter()
            .filter(|event| event.approval_status == ApprovalStatus::Pending)
            .collect())
    }

    pub async fn stats(&self) -> Result<AdminStats> {
        let events = self.store.get_events(false).await?;
        let count = |status: ApprovalStatus| events.iter().filter(|event| event.approval_status == status).count();
        let registrations: Vec<serde_json::Value> = self.store.kv().get(keys::EVENT_REGISTRATIONS, Vec::new());

        Ok(AdminStats {
            total_events: events.len(),
            pending_events: count(ApprovalStatus::Pending),
            approved_events: count(ApprovalStatus::Approved),
            rejected_events: count(ApprovalStatus::Rejected),
            total_registrations: registrations.len(),
        })
    }
}
