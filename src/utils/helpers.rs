//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Identifier for a freshly added notification
pub fn generate_notification_id() -> String {
    format!("n-{}", generate_uuid())
}

/// Registration identifier in the `REG-<millis>-<SUFFIX>` form printed on tickets
pub fn generate_registration_id(now: DateTime<Utc>) -> String {
    format!("REG-{}-{}", now.timestamp_millis(), generate_random_string(9))
}

/// Generate a random uppercase alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Truncate text to a maximum number of characters, appending an ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Case-insensitive substring match; an empty needle matches everything
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Calculate pagination offset
pub fn calculate_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}

/// Number of pages needed for `total_items`, at least one
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    std::cmp::max(1, total_items.div_ceil(page_size))
}

/// Human-readable distance to an upcoming start time
pub fn format_time_until(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = start.signed_duration_since(now);

    if diff < Duration::zero() {
        return "Past".to_string();
    }

    let days = diff.num_days();
    let hours = diff.num_hours() % 24;

    if days > 0 {
        format!("{} day{} away", days, if days > 1 { "s" } else { "" })
    } else if hours > 0 {
        format!("{} hour{} away", hours, if hours > 1 { "s" } else { "" })
    } else {
        "Today".to_string()
    }
}
