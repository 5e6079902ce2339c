//! Per-user notification list
//!
//! Stored most-recent-first under `notifications_<role>_<username>`, with
//! `student`/`guest` standing in when nobody is signed in.

use chrono::Utc;
use tracing::debug;
use crate::bus::topics;
use crate::models::{Notification, NotificationDraft};
use crate::storage::keys;
use crate::utils::errors::Result;
use crate::utils::helpers::generate_notification_id;
use super::DataStore;

const GUEST_ROLE: &str = "student";
const GUEST_USERNAME: &str = "guest";

/// Notification operations scoped to the current session
pub struct Notifications<'a> {
    store: &'a DataStore,
}

impl<'a> Notifications<'a> {
    pub(super) fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    pub fn storage_key(&self) -> String {
        match self.store.current_user() {
            Some(user) => keys::notifications(user.role.as_str(), &user.username),
            None => keys::notifications(GUEST_ROLE, GUEST_USERNAME),
        }
    }

    pub fn load(&self) -> Vec<Notification> {
        self.store.kv().get(&self.storage_key(), Vec::new())
    }

    /// Persist the list, keeping only the newest entries up to the cap
    pub fn save(&self, mut list: Vec<Notification>) -> Result<Vec<Notification>> {
        list.truncate(self.store.settings().notifications.max_entries);

        let key = self.storage_key();
        let payload = serde_json::to_value(&list)?;
        self.store.kv().set(&key, &payload)?;
        self.store.bus().emit(topics::NOTIFICATIONS_CHANGED, &payload);
        Ok(list)
    }

    pub fn add(&self, draft: NotificationDraft) -> Result<Notification> {
        let notification = Notification {
            id: draft.id.unwrap_or_else(generate_notification_id),
            title: draft.title,
            message: draft.message,
            kind: draft.kind,
            read: draft.read,
            created_at: Utc::now(),
        };

        let mut list = self.load();
        list.insert(0, notification.clone());
        self.save(list)?;

        debug!(id = %notification.id, "Notification added");
        Ok(notification)
    }

    /// Returns how many entries changed
    pub fn mark_all_read(&self) -> Result<usize> {
        let mut list = self.load();
        let mut changed = 0;
        for notification in list.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }

        if changed > 0 {
            self.save(list)?;
        }
        Ok(changed)
    }

    pub fn mark_read(&self, id: &str) -> Result<bool> {
        let mut list = self.load();
        let Some(notification) = list.iter_mut().find(|n| n.id == id && !n.read) else {
            return Ok(false);
        };
        notification.read = true;
        self.save(list)?;
        Ok(true)
    }

    pub fn unread_count(&self) -> usize {
        self.load().iter().filter(|n| !n.read).count()
    }

    pub fn clear(&self) -> Result<()> {
        self.save(Vec::new())?;
        Ok(())
    }
}
