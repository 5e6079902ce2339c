//! Event catalog and club directory
//!
//! Pure querying over already-loaded collections: filtering, sorting,
//! pagination and the summary counters shown above the listings.

use std::collections::{BTreeSet, HashMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::models::{Club, Event, TemporalStatus};
use crate::store::DataStore;
use crate::utils::errors::Result;
use crate::utils::helpers::{calculate_offset, contains_ignore_case, format_time_until, total_pages, truncate_text};

pub const EVENTS_PAGE: &str = "events";
pub const CLUBS_PAGE: &str = "clubs";
const ALL: &str = "all";
const EXCERPT_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Date,
    Title,
    Price,
}

/// Events listing controls; missing keys restore to their defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFilters {
    pub search: String,
    pub status: StatusFilter,
    /// Club name, or `all`
    pub club: String,
    pub sort: SortOrder,
}

impl Default for EventFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            club: ALL.to_string(),
            sort: SortOrder::Date,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubFilters {
    pub search: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// One event as shown on a listing card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCard {
    pub event: Event,
    pub temporal_status: TemporalStatus,
    pub time_until: String,
    pub excerpt: String,
    pub spots_left: u32,
    pub fill_percent: u32,
}

impl EventCard {
    pub fn new(event: Event, now: DateTime<Utc>) -> Self {
        let time_until = event
            .starts_at()
            .map(|start| format_time_until(start, now))
            .unwrap_or_else(|| "Past".to_string());

        Self {
            temporal_status: event.temporal_status(now),
            excerpt: truncate_text(&event.description, EXCERPT_CHARS),
            spots_left: event.spots_left(),
            fill_percent: event.fill_percent(),
            time_until,
            event,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_events: usize,
    pub upcoming_events: usize,
    pub active_clubs: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total_clubs: usize,
    pub total_members: u64,
    pub total_events: u64,
}

/// Filter and sort events for the listing page
pub fn query(events: &[Event], filters: &EventFilters, now: DateTime<Utc>) -> Vec<Event> {
    let search = filters.search.trim();
    let club = filters.club.trim();

    let mut matched: Vec<Event> = events
        .iter()
        .filter(|event| {
            search.is_empty()
                || contains_ignore_case(&event.title, search)
                || contains_ignore_case(&event.description, search)
                || contains_ignore_case(&event.club_name, search)
                || contains_ignore_case(&event.category, search)
        })
        .filter(|event| match filters.status {
            StatusFilter::All => true,
            StatusFilter::Upcoming => event.temporal_status(now) == TemporalStatus::Upcoming,
            StatusFilter::Past => event.temporal_status(now) == TemporalStatus::Past,
        })
        .filter(|event| club.is_empty() || club == ALL || event.club_name == club)
        .cloned()
        .collect();

    match filters.sort {
        // Undated events sort last
        SortOrder::Date => matched.sort_by_key(|event| (event.starts_at().is_none(), event.starts_at())),
        SortOrder::Title => matched.sort_by_cached_key(|event| event.title.to_lowercase()),
        SortOrder::Price => matched.sort_by_key(|event| event.price),
    }

    matched
}

/// Slice one page out of `items`; out-of-range pages clamp to the nearest valid one
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = page.clamp(1, total_pages);
    let offset = calculate_offset(page, page_size);

    Page {
        items: items.iter().skip(offset).take(page_size).cloned().collect(),
        page,
        total_pages,
        total_items: items.len(),
    }
}

pub fn catalog_stats(events: &[Event], now: DateTime<Utc>) -> CatalogStats {
    CatalogStats {
        total_events: events.len(),
        upcoming_events: events
            .iter()
            .filter(|event| event.temporal_status(now) == TemporalStatus::Upcoming)
            .count(),
        active_clubs: events.iter().map(|event| event.club_name.as_str()).collect::<BTreeSet<_>>().len(),
    }
}

/// Distinct club names referenced by events, sorted
pub fn club_names(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| event.club_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn search_clubs(clubs: &[Club], filters: &ClubFilters) -> Vec<Club> {
    let search = filters.search.trim();
    clubs
        .iter()
        .filter(|club| {
            search.is_empty()
                || contains_ignore_case(&club.name, search)
                || contains_ignore_case(&club.description, search)
                || contains_ignore_case(&club.president, search)
        })
        .cloned()
        .collect()
}

/// Fill each club's `events_count` from the events that name it
pub fn with_event_counts(clubs: &[Club], events: &[Event]) -> Vec<Club> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for event in events {
        *counts.entry(event.club_name.as_str()).or_default() += 1;
    }

    clubs
        .iter()
        .map(|club| Club {
            events_count: Some(counts.get(club.name.as_str()).copied().unwrap_or(0)),
            ..club.clone()
        })
        .collect()
}

pub fn directory_stats(clubs: &[Club]) -> DirectoryStats {
    DirectoryStats {
        total_clubs: clubs.len(),
        total_members: clubs.iter().map(|club| u64::from(club.member_count)).sum(),
        total_events: clubs.iter().map(|club| u64::from(club.events_count.unwrap_or(0))).sum(),
    }
}

/// Listing queries bound to the store and the persisted filter state
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: DataStore,
}

impl CatalogService {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    pub fn event_filters(&self) -> EventFilters {
        self.store.typed_filters(EVENTS_PAGE)
    }

    pub fn save_event_filters(&self, filters: &EventFilters) -> Result<()> {
        self.store.set_typed_filters(EVENTS_PAGE, filters)
    }

    pub fn club_filters(&self) -> ClubFilters {
        self.store.typed_filters(CLUBS_PAGE)
    }

    pub fn save_club_filters(&self, filters: &ClubFilters) -> Result<()> {
        self.store.set_typed_filters(CLUBS_PAGE, filters)
    }

    /// One page of event cards under the saved filters
    pub async fn browse_events(&self, page: usize, now: DateTime<Utc>) -> Result<Page<EventCard>> {
        let events = self.store.get_events(false).await?;
        let filters = self.event_filters();
        let matched = query(&events, &filters, now);

        debug!(matched = matched.len(), total = events.len(), page = page, "Events filtered");
        let Page { items, page, total_pages, total_items } =
            paginate(&matched, page, self.store.settings().catalog.page_size);

        Ok(Page {
            items: items.into_iter().map(|event| EventCard::new(event, now)).collect(),
            page,
            total_pages,
            total_items,
        })
    }

    pub async fn event_stats(&self, now: DateTime<Utc>) -> Result<CatalogStats> {
        let events = self.store.get_events(false).await?;
        Ok(catalog_stats(&events, now))
    }

    /// Clubs under the saved search, with event counts filled in
    pub async fn browse_clubs(&self) -> Result<Vec<Club>> {
        let (clubs, events) = futures::try_join!(self.store.get_clubs(false), self.store.get_events(false))?;
        let counted = with_event_counts(&clubs, &events);
        Ok(search_clubs(&counted, &self.club_filters()))
    }
}
