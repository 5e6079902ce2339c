//! Student profiles, keyed by email

use std::collections::BTreeMap;
use crate::models::StudentProfile;
use crate::storage::keys;
use crate::store::DataStore;
use crate::utils::errors::{CampusError, Result};
use crate::utils::logging::log_user_action;

#[derive(Debug, Clone)]
pub struct ProfileService {
    store: DataStore,
}

impl ProfileService {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    fn all(&self) -> BTreeMap<String, StudentProfile> {
        self.store.kv().get(keys::STUDENT_PROFILES, BTreeMap::new())
    }

    fn normalize(email: &str) -> Result<String> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(CampusError::InvalidInput("email is required".to_string()));
        }
        Ok(email)
    }

    pub fn save(&self, email: &str, profile: StudentProfile) -> Result<()> {
        let email = Self::normalize(email)?;
        let mut profiles = self.all();
        profiles.insert(email.clone(), profile);
        self.store.kv().set(keys::STUDENT_PROFILES, &profiles)?;
        log_user_action(&email, "save_profile", None);
        Ok(())
    }

    pub fn get(&self, email: &str) -> Option<StudentProfile> {
        let email = Self::normalize(email).ok()?;
        self.all().remove(&email)
    }

    pub fn require(&self, email: &str) -> Result<StudentProfile> {
        self.get(email).ok_or_else(|| CampusError::ProfileNotFound {
            email: email.trim().to_string(),
        })
    }
}
