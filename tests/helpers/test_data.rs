//! Test data helpers for creating collections and form inputs

#![allow(dead_code)]

use serde_json::{json, Value};
use campus_connect::models::{EventDraft, Participant, StudentProfile};

/// Events fixture; ids deliberately mix numbers and strings
pub fn events_fixture() -> Value {
    json!([
        {
            "id": 3,
            "title": "AI Summit",
            "description": "Talks on machine learning",
            "clubName": "Technology Innovation Club",
            "date": "2030-03-01T10:00:00",
            "time": "10:00 AM",
            "location": "Main Hall",
            "status": "approved",
            "maxParticipants": 2,
            "currentParticipants": 0,
            "category": "Technology",
            "price": 200
        },
        {
            "id": "7",
            "title": "Chess Open",
            "description": "Rapid tournament",
            "clubName": "Chess Club",
            "date": "2020-08-01T18:00:00",
            "time": "6:00 PM",
            "location": "Library Hall",
            "status": "past",
            "maxParticipants": 40,
            "currentParticipants": 12,
            "category": "Games",
            "price": 0
        },
        {
            "id": 5,
            "title": "Startup Pitch Night",
            "description": "Founders pitch to alumni",
            "clubName": "Entrepreneurship Cell",
            "date": "2030-05-10T17:00:00",
            "time": "5:00 PM",
            "location": "Seminar Hall B",
            "status": "pending",
            "maxParticipants": 100,
            "currentParticipants": 0,
            "category": "Business",
            "price": 0
        }
    ])
}

pub fn clubs_fixture() -> Value {
    json!([
        {
            "id": 1,
            "name": "Technology Innovation Club",
            "description": "Software and hardware projects",
            "logo": "https://example.com/tech.png",
            "foundedYear": 2015,
            "memberCount": 120,
            "president": "Arjun Mehta",
            "contact": "tech@campus.edu"
        },
        {
            "id": 2,
            "name": "Chess Club",
            "description": "Weekly blitz and rapid games",
            "logo": "https://example.com/chess.png",
            "foundedYear": 2012,
            "memberCount": 35,
            "president": "Ira Das",
            "contact": "chess@campus.edu"
        }
    ])
}

pub fn participant(name: &str, email: &str) -> Participant {
    Participant {
        full_name: name.to_string(),
        email: email.to_string(),
        phone: "9876543210".to_string(),
        roll_number: "CS21001".to_string(),
        department: "Computer Science".to_string(),
        year_of_study: "3".to_string(),
        additional_info: String::new(),
    }
}

pub fn event_draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: "Hands-on session".to_string(),
        image: None,
        date: "2030-06-15".to_string(),
        time: "14:00".to_string(),
        location: "Computer Lab 3".to_string(),
        max_participants: 30,
        category: "Technology".to_string(),
        difficulty: "Intermediate".to_string(),
        duration: "4 Hours".to_string(),
        price: 500,
    }
}

pub fn student_profile(name: &str) -> StudentProfile {
    StudentProfile {
        name: name.to_string(),
        roll: "CS21001".to_string(),
        dept: "Computer Science".to_string(),
        year: "3".to_string(),
        cgpa: "8.7".to_string(),
        skills: "Rust, SQL".to_string(),
        ..Default::default()
    }
}
