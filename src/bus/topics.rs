//! Topic names published by the data layer

pub const LOADING_START: &str = "loading:start";
pub const LOADING_END: &str = "loading:end";
pub const USER_CHANGED: &str = "user:changed";
pub const THEME_CHANGED: &str = "theme:changed";
pub const NOTIFICATIONS_CHANGED: &str = "notifications:changed";
pub const EVENTS_CHANGED: &str = "events:changed";
pub const CLUBS_CHANGED: &str = "clubs:changed";
pub const REGISTRATIONS_CHANGED: &str = "registrations:changed";
pub const CLUB_JOIN_REQUESTED: &str = "clubs:join-requested";

/// Page-scoped filter topic, e.g. `filters:events`
pub fn filters(page: &str) -> String {
    format!("filters:{}", page)
}
