use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub tz: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub title: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub program_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateProgramRequest {
    pub title: String,
    #[serde(default)]
    pub total_price_cents: i64,
    pub capacity: i32,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub session_id: Option<String>,
    pub program_id: Option<String>,
    pub participant_id: String,
}
