//! Session and theme
//!
//! The session is a single slot: `username` and `userRole` stored as plain
//! text. Signing out is the one coordinated teardown of per-user state.

use serde_json::{json, Value};
use tracing::{debug, info};
use crate::bus::topics;
use crate::models::{CurrentUser, Role, Theme};
use crate::storage::keys;
use crate::utils::errors::{CampusError, Result};
use crate::utils::logging::log_user_action;
use super::DataStore;

impl DataStore {
    /// Signed-in user, or `None` when no username is stored
    pub fn current_user(&self) -> Option<CurrentUser> {
        let username = self.kv().get_string(keys::USERNAME)?;
        let role = Role::from_stored(self.kv().get_string(keys::USER_ROLE).as_deref());
        Some(CurrentUser::new(username, role))
    }

    pub fn set_current_user(&self, user: &CurrentUser) -> Result<()> {
        let username = user.username.trim();
        if username.is_empty() {
            return Err(CampusError::InvalidInput("username must not be empty".to_string()));
        }

        self.kv().set_string(keys::USERNAME, username)?;
        self.kv().set_string(keys::USER_ROLE, user.role.as_str())?;

        let stored = CurrentUser::new(username, user.role);
        self.bus().emit(topics::USER_CHANGED, &serde_json::to_value(&stored)?);
        log_user_action(username, "sign_in", Some(user.role.as_str()));
        Ok(())
    }

    /// Remove every piece of per-user state. The theme is a device
    /// preference and survives.
    pub fn clear_session(&self) -> Result<()> {
        let user = self.current_user();

        self.kv().remove(keys::USERNAME)?;
        self.kv().remove(keys::USER_ROLE)?;
        if let Some(ref user) = user {
            self.kv().remove(&keys::notifications(user.role.as_str(), &user.username))?;
        }
        self.kv().remove(keys::EVENTS_CACHE)?;
        self.kv().remove(keys::CLUBS_CACHE)?;
        for key in self.kv().keys_with_prefix(keys::FILTERS_PREFIX) {
            self.kv().remove(&key)?;
        }

        self.bus().emit(topics::USER_CHANGED, &Value::Null);
        match user {
            Some(user) => log_user_action(&user.username, "sign_out", None),
            None => debug!("Session cleared with no user signed in"),
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.kv()
            .get_string(keys::THEME)
            .map(|raw| Theme::normalize(&raw))
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.kv().set_string(keys::THEME, theme.as_str())?;
        self.bus().emit(topics::THEME_CHANGED, &json!(theme.as_str()));
        info!(theme = theme.as_str(), "Theme changed");
        Ok(())
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        let theme = self.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }
}
