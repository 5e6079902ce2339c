//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod id;
pub mod event;
pub mod club;
pub mod registration;
pub mod session;
pub mod notification;
pub mod profile;

// Re-export commonly used models
pub use id::EntityId;
pub use event::{Event, EventDraft, UpdateEventRequest, ApprovalStatus, TemporalStatus};
pub use club::{Club, ClubJoinRequest};
pub use registration::{Registration, Participant, EventSnapshot};
pub use session::{CurrentUser, Role, Theme};
pub use notification::{Notification, NotificationDraft, NotificationKind};
pub use profile::StudentProfile;
