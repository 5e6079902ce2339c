//! Page-level workflows over a shared context

mod helpers;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use serde_json::json;
use campus_connect::{
    bus::topics,
    models::{ApprovalStatus, CurrentUser, EntityId, NotificationKind, Role},
    services::{registration::ticket_text, EventFilters, EventTemplate, SortOrder, StatusFilter},
    storage::keys,
    CampusError,
};
use helpers::*;

#[tokio::test]
async fn test_register_appends_and_bumps_participants() {
    let ctx = TestContext::new();
    ctx.warm().await;

    let registration = ctx
        .app
        .registrations()
        .register(3u64, participant("Asha Rao", "asha@campus.edu"))
        .await
        .unwrap();

    assert!(registration.id.starts_with("REG-"));
    assert_eq!(registration.id.rsplit('-').next().map(str::len), Some(9));
    assert_eq!(registration.event_id, EntityId::from(3));
    assert_eq!(registration.event.location, "Main Hall");

    let event = ctx.store.find_event(3u64).await.unwrap();
    assert_eq!(event.current_participants, 1);
    assert_eq!(ctx.app.registrations().count(), 1);
    assert_eq!(ctx.app.registrations().for_event("3").len(), 1);
    assert_eq!(ctx.log.count(topics::REGISTRATIONS_CHANGED), 1);
    assert_eq!(ctx.log.count(topics::EVENTS_CHANGED), 1);

    let ticket = ticket_text(&registration);
    assert!(ticket.contains("Event: AI Summit"));
}

#[tokio::test]
async fn test_signup_page_loads_event_by_any_id_form() {
    let ctx = TestContext::new();
    ctx.warm().await;
    let service = ctx.app.registrations();

    let event = service.event_for_signup("3").await.unwrap();
    assert_eq!(event.title, "AI Summit");
    assert_eq!(event.spots_left(), 2);

    let chess = service.event_for_signup(7u64).await.unwrap();
    assert_eq!(chess.title, "Chess Open");

    let missing = service.event_for_signup(404u64).await;
    assert_matches!(missing, Err(CampusError::EntityNotFound { ref id, .. }) if id == "404");
}

#[tokio::test]
async fn test_register_refuses_full_event() {
    let ctx = TestContext::new();
    ctx.warm().await;
    let service = ctx.app.registrations();

    service.register(3u64, participant("Asha Rao", "asha@campus.edu")).await.unwrap();
    service.register(3u64, participant("Ravi Kumar", "ravi@campus.edu")).await.unwrap();

    let result = service.register(3u64, participant("Meera Shah", "meera@campus.edu")).await;
    assert_matches!(result, Err(CampusError::EventFull { ref event_id }) if event_id == "3");
    assert_eq!(service.count(), 2);
}

#[tokio::test]
async fn test_register_unknown_event_and_bad_form() {
    let ctx = TestContext::new();
    ctx.warm().await;
    let service = ctx.app.registrations();

    let missing = service.register(404u64, participant("Asha Rao", "asha@campus.edu")).await;
    assert_matches!(missing, Err(CampusError::EntityNotFound { .. }));

    let invalid = service.register(3u64, participant("Asha Rao", "not-an-email")).await;
    assert_matches!(invalid, Err(CampusError::InvalidInput(_)));
    assert_eq!(service.count(), 0);
}

#[tokio::test]
async fn test_admin_review_flow() {
    let ctx = TestContext::new();
    ctx.warm().await;
    ctx.store.set_current_user(&CurrentUser::new("dean", Role::Admin)).unwrap();
    let admin = ctx.app.admin();

    let pending = admin.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].title, "Startup Pitch Night");

    let approved = admin.approve(5u64).await.unwrap();
    assert_eq!(approved.approval_status, ApprovalStatus::Approved);
    assert!(admin.pending().await.unwrap().is_empty());

    admin.reject("7").await.unwrap();

    let stats = admin.stats().await.unwrap();
    assert_eq!(stats.total_events, 3);
    assert_eq!(stats.pending_events, 0);
    assert_eq!(stats.approved_events, 2);
    assert_eq!(stats.rejected_events, 1);

    let notifications = ctx.store.notifications().load();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].kind, NotificationKind::Warning);
    assert_eq!(notifications[1].kind, NotificationKind::Success);
    assert!(ctx.store.kv().contains(&keys::notifications("admin", "dean")));
}

#[tokio::test]
async fn test_admin_review_missing_event() {
    let ctx = TestContext::new();
    ctx.warm().await;

    let result = ctx.app.admin().approve(77u64).await;
    assert_matches!(result, Err(CampusError::EntityNotFound { .. }));
    assert!(ctx.store.notifications().load().is_empty());
}

#[tokio::test]
async fn test_club_submits_pending_event() {
    let ctx = TestContext::new();
    ctx.warm().await;
    let clubs = ctx.app.clubs();

    let created = clubs
        .submit_event("Chess Club", event_draft("Blitz Workshop"))
        .await
        .unwrap();

    assert_eq!(created.id, EntityId::from(8));
    assert_eq!(created.approval_status, ApprovalStatus::Pending);
    assert_eq!(created.club_logo, "https://example.com/chess.png");
    assert_eq!(created.date, "2030-06-15T14:00:00");
    assert_eq!(created.current_participants, 0);

    let own = clubs.events_for_club("Chess Club").await.unwrap();
    assert_eq!(own.len(), 2);

    let stats = clubs.dashboard_stats("Chess Club").await.unwrap();
    assert_eq!(stats.total_events, 2);
    assert_eq!(stats.pending_events, 1);
    assert_eq!(stats.approved_events, 1);
}

#[tokio::test]
async fn test_club_template_draft_needs_schedule() {
    let ctx = TestContext::new();
    ctx.warm().await;

    let result = ctx
        .app
        .clubs()
        .submit_event("Chess Club", EventTemplate::Competition.draft())
        .await;
    assert_matches!(result, Err(CampusError::InvalidInput(_)));
    assert_eq!(ctx.log.count(topics::EVENTS_CHANGED), 0);
}

#[tokio::test]
async fn test_dashboard_counts_registrations_by_canonical_id() {
    let ctx = TestContext::new();
    ctx.warm().await;

    // Registrations written by the browser carry numeric event ids
    ctx.store
        .kv()
        .set(keys::EVENT_REGISTRATIONS, &json!([{"eventId": 3}, {"eventId": "3"}, {"eventId": 7}]))
        .unwrap();

    let stats = ctx.app.clubs().dashboard_stats("Technology Innovation Club").await.unwrap();
    assert_eq!(stats.registrations, 2);
}

#[tokio::test]
async fn test_upcoming_approved_and_delete() {
    let ctx = TestContext::new();
    ctx.warm().await;
    let clubs = ctx.app.clubs();
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let upcoming = clubs.upcoming_approved(now, 6).await.unwrap();
    let titles: Vec<_> = upcoming.iter().map(|event| event.title.as_str()).collect();
    assert_eq!(titles, vec!["AI Summit"]);

    clubs.delete_event(3u64).await.unwrap();
    assert!(clubs.upcoming_approved(now, 6).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_join_requests() {
    let ctx = TestContext::new();
    ctx.warm().await;
    let clubs = ctx.app.clubs();

    let request = clubs.request_join(2u64).await.unwrap();
    assert_eq!(request.username, "Student");
    assert_eq!(request.club_name, "Chess Club");
    assert!(clubs.joined_clubs().contains(&EntityId::from(2)));
    assert_eq!(ctx.log.count(topics::CLUB_JOIN_REQUESTED), 1);

    let duplicate = clubs.request_join("2").await;
    assert_matches!(duplicate, Err(CampusError::AlreadyRequested { .. }));

    // A different user may still ask
    ctx.store.set_current_user(&CurrentUser::new("ravi", Role::Student)).unwrap();
    clubs.request_join(2u64).await.unwrap();

    let stored: Vec<serde_json::Value> = ctx.store.kv().get(keys::CLUB_JOIN_REQUESTS, Vec::new());
    assert_eq!(stored.len(), 2);
    assert_eq!(ctx.store.kv().get_string(keys::JOINED_CLUBS).as_deref(), Some("[\"2\"]"));

    let unknown = clubs.request_join(99u64).await;
    assert_matches!(unknown, Err(CampusError::EntityNotFound { .. }));
}

#[tokio::test]
async fn test_catalog_browse_with_saved_filters() {
    let ctx = TestContext::new();
    ctx.warm().await;
    let catalog = ctx.app.catalog();

    assert_eq!(catalog.event_filters(), EventFilters::default());

    catalog
        .save_event_filters(&EventFilters {
            status: StatusFilter::Upcoming,
            sort: SortOrder::Title,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(ctx.log.count("filters:events"), 1);

    let page = catalog.browse_events(1, Utc::now()).await.unwrap();
    let titles: Vec<_> = page.items.iter().map(|card| card.event.title.as_str()).collect();
    assert_eq!(titles, vec!["AI Summit", "Startup Pitch Night"]);
    assert!(page.items.iter().all(|card| card.time_until.ends_with("away")));
    assert_eq!(page.total_pages, 1);

    let restored = catalog.event_filters();
    assert_eq!(restored.status, StatusFilter::Upcoming);
    assert_eq!(restored.club, "all");
}

#[tokio::test]
async fn test_club_directory() {
    let ctx = TestContext::new();
    let catalog = ctx.app.catalog();

    let clubs = catalog.browse_clubs().await.unwrap();
    assert_eq!(clubs.len(), 2);
    assert_eq!(clubs[0].events_count, Some(1));

    catalog
        .save_club_filters(&campus_connect::services::ClubFilters {
            search: "blitz".to_string(),
        })
        .unwrap();
    let found = catalog.browse_clubs().await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Chess Club");
}

#[tokio::test]
async fn test_profiles() {
    let ctx = TestContext::new();
    let profiles = ctx.app.profiles();

    profiles.save("asha@campus.edu", student_profile("Asha Rao")).unwrap();
    assert_eq!(profiles.require("asha@campus.edu").unwrap().name, "Asha Rao");
    assert_matches!(profiles.require("ravi@campus.edu"), Err(CampusError::ProfileNotFound { .. }));

    let stored: serde_json::Value = ctx.store.kv().get(keys::STUDENT_PROFILES, json!({}));
    assert_eq!(stored["asha@campus.edu"]["name"], json!("Asha Rao"));
}

#[tokio::test]
async fn test_warm_up_and_health() {
    let ctx = TestContext::new();
    assert!(!ctx.app.health().is_healthy());

    let report = ctx.app.warm_up(false).await.unwrap();
    assert_eq!((report.events, report.clubs), (3, 2));
    assert!(ctx.app.health().is_healthy());
    assert!(ctx.app.health().get_issues().is_empty());
}
