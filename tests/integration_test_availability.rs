mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use common::TestApp;
use serde_json::json;

fn next_weekday_at(day: Weekday, hour: u32) -> DateTime<Utc> {
    let mut date = (Utc::now() + Duration::days(2)).date_naive();
    while date.weekday() != day {
        date = date.succ_opt().unwrap();
    }
    date.and_hms_opt(hour, 0, 0).unwrap().and_utc()
}

#[tokio::test]
async fn test_program_and_ad_hoc_scenario() {
    let app = TestApp::new().await;
    let mentor = "mentor-scenario";
    let monday = next_weekday_at(Weekday::Mon, 10);

    // 1. Program P1 with capacity 10 and two sessions
    let p1 = app.create_program(mentor, "P1", 10).await;
    app.create_session(mentor, json!({
        "title": "P1 kickoff", "start_time": monday.to_rfc3339(),
        "end_time": (monday + Duration::hours(1)).to_rfc3339(), "program_id": p1
    })).await;
    app.create_session(mentor, json!({
        "title": "P1 follow-up", "start_time": (monday + Duration::days(2)).to_rfc3339(), "program_id": p1
    })).await;

    // 2. Free ad hoc intro call
    let intro = app.create_session(mentor, json!({
        "title": "Intro Call", "start_time": (monday + Duration::hours(3)).to_rfc3339(), "price_cents": 0
    })).await;

    // 3. Four program bookings, one intro booking
    for i in 0..4 {
        assert_eq!(app.book(json!({"program_id": p1, "participant_id": format!("p{}", i)})).await, StatusCode::CREATED);
    }
    assert_eq!(app.book(json!({"session_id": intro, "participant_id": "x"})).await, StatusCode::CREATED);

    // 4. Availability
    let report = app.availability(mentor).await;
    let groups = report["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);

    assert_eq!(groups[0]["title"], "P1");
    assert_eq!(groups[0]["capacity"], 10);
    assert_eq!(groups[0]["joined"], 4);
    assert_eq!(groups[0]["seats_left"], 6);
    assert_eq!(groups[0]["label"], "4 joined / 10 total · 6 left");
    assert_eq!(groups[0]["sessions"].as_array().unwrap().len(), 2);

    assert_eq!(groups[1]["title"], "Intro Call");
    assert!(groups[1].get("capacity").is_none());
    assert!(groups[1].get("seats_left").is_none());
    assert_eq!(groups[1]["joined"], 1);

    assert_eq!(report["total_joined"], 5);
    assert_eq!(report["total_capacity"], 10);
    assert_eq!(report["available_weekdays"], json!(["Monday", "Wednesday"]));
    assert_eq!(report["summary"], "5 joined / 10 total");
}

#[tokio::test]
async fn test_mentor_without_sessions() {
    let app = TestApp::new().await;

    let report = app.availability("nobody").await;
    assert_eq!(report["available_weekdays"], json!([]));
    assert_eq!(report["groups"], json!([]));
    assert_eq!(report["total_joined"], 0);
    assert!(report["total_capacity"].is_null());
    assert_eq!(report["summary"], "no upcoming sessions");
}

#[tokio::test]
async fn test_price_splits_same_titled_workshops() {
    let app = TestApp::new().await;
    let mentor = "mentor-workshop";
    let start = Utc::now() + Duration::days(3);

    let cheap = app.create_session(mentor, json!({"title": "Workshop", "start_time": start.to_rfc3339(), "price_cents": 5000})).await;
    let dear = app.create_session(mentor, json!({"title": "workshop", "start_time": (start + Duration::hours(1)).to_rfc3339(), "price_cents": 7500})).await;
    let again = app.create_session(mentor, json!({"title": "WORKSHOP", "start_time": (start + Duration::days(7)).to_rfc3339(), "price_cents": 5000})).await;

    app.book(json!({"session_id": cheap, "participant_id": "a"})).await;
    app.book(json!({"session_id": again, "participant_id": "b"})).await;
    app.book(json!({"session_id": dear, "participant_id": "c"})).await;

    let report = app.availability(mentor).await;
    let groups = report["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["title"], "Workshop");
    assert_eq!(groups[0]["price_total_cents"], 5000);
    assert_eq!(groups[0]["joined"], 2);
    assert_eq!(groups[0]["sessions"].as_array().unwrap().len(), 2);
    assert_eq!(groups[1]["title"], "workshop");
    assert_eq!(groups[1]["joined"], 1);
    assert!(report["total_capacity"].is_null());
}

#[tokio::test]
async fn test_weekdays_follow_requested_timezone() {
    let app = TestApp::new().await;
    let mentor = "mentor-tz";
    let late_monday = next_weekday_at(Weekday::Mon, 20);

    app.create_session(mentor, json!({"title": "Late chat", "start_time": late_monday.to_rfc3339()})).await;

    let utc = app.availability(mentor).await;
    assert_eq!(utc["available_weekdays"], json!(["Monday"]));
    assert_eq!(utc["timezone"], "UTC");

    let (status, auckland) = app.get(&format!("/api/v1/mentors/{}/availability?tz=Pacific/Auckland", mentor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(auckland["available_weekdays"], json!(["Tuesday"]));

    let (status, body) = app.get(&format!("/api/v1/mentors/{}/availability?tz=Mars/Olympus", mentor)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid timezone");
}

#[tokio::test]
async fn test_past_sessions_and_cancelled_bookings_are_ignored() {
    let app = TestApp::new().await;
    let mentor = "mentor-history";

    let upcoming = app.create_session(mentor, json!({
        "title": "Office Hours", "start_time": (Utc::now() + Duration::days(1)).to_rfc3339()
    })).await;

    // a past session of the same series, written directly since the API rejects it
    sqlx::query(
        "INSERT INTO mentor_sessions (id, mentor_id, title, start_time, end_time, price_cents, program_id, created_at)
         VALUES ('past-1', ?, 'Office Hours', ?, NULL, NULL, NULL, ?)"
    )
        .bind(mentor)
        .bind(Utc::now() - Duration::days(1))
        .bind(Utc::now())
        .execute(&app.pool).await.unwrap();

    sqlx::query(
        "INSERT INTO bookings (id, session_id, program_id, participant_id, status, created_at)
         VALUES ('b-cancelled', ?, NULL, 'gone', 'CANCELLED', ?)"
    )
        .bind(&upcoming)
        .bind(Utc::now())
        .execute(&app.pool).await.unwrap();
    app.book(json!({"session_id": upcoming, "participant_id": "here"})).await;

    let report = app.availability(mentor).await;
    let groups = report["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["sessions"].as_array().unwrap().len(), 1);
    assert_eq!(groups[0]["sessions"][0]["id"], upcoming.as_str());
    assert_eq!(groups[0]["joined"], 1);
}

#[tokio::test]
async fn test_untitled_sessions_fall_back_to_default_label() {
    let app = TestApp::new().await;
    let mentor = "mentor-untitled";
    let start = Utc::now() + Duration::days(2);

    app.create_session(mentor, json!({"start_time": start.to_rfc3339()})).await;
    app.create_session(mentor, json!({"title": "   ", "start_time": (start + Duration::hours(2)).to_rfc3339()})).await;

    let report = app.availability(mentor).await;
    let groups = report["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["title"], "Session");
    assert_eq!(groups[0]["label"], "0 joined");
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let app = TestApp::new().await;
    let mentor = "mentor-stable";
    let start = Utc::now() + Duration::days(1);

    let program = app.create_program(mentor, "Bootcamp", 3).await;
    app.create_session(mentor, json!({"title": "B", "start_time": (start + Duration::hours(5)).to_rfc3339(), "price_cents": 100})).await;
    app.create_session(mentor, json!({"start_time": (start + Duration::hours(3)).to_rfc3339(), "program_id": program})).await;
    app.create_session(mentor, json!({"title": "A", "start_time": start.to_rfc3339(), "price_cents": 100})).await;

    let first = app.availability(mentor).await;
    let second = app.availability(mentor).await;
    assert_eq!(first, second);

    let titles: Vec<&str> = first["groups"].as_array().unwrap().iter().map(|g| g["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["A", "Bootcamp", "B"]);
}
