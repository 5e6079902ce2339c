//! Storage key names shared with the browser front end

pub const USERNAME: &str = "username";
pub const USER_ROLE: &str = "userRole";
pub const THEME: &str = "theme";
pub const EVENTS_CACHE: &str = "events_cache";
pub const CLUBS_CACHE: &str = "clubs_cache";
pub const EVENT_REGISTRATIONS: &str = "eventRegistrations";
pub const JOINED_CLUBS: &str = "joinedClubs";
pub const CLUB_JOIN_REQUESTS: &str = "clubJoinRequests";
pub const STUDENT_PROFILES: &str = "studentProfiles";

pub const FILTERS_PREFIX: &str = "filters_";

pub fn filters(page: &str) -> String {
    format!("{}{}", FILTERS_PREFIX, page)
}

pub fn notifications(role: &str, username: &str) -> String {
    format!("notifications_{}_{}", role, username)
}
