//! Student profile model

use serde::{Deserialize, Serialize};

/// Self-described student profile, stored under the student's email
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    pub name: String,
    pub roll: String,
    pub dept: String,
    pub year: String,
    pub dob: String,
    pub cgpa: String,
    pub internships: String,
    pub skills: String,
    pub interests: String,
    /// Data URL of the uploaded picture, empty when none
    pub profile_pic: String,
}
