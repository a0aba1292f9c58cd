use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A single time slot a mentor offers. Sessions that reference a program are
/// sold as part of that program; the rest form ad hoc series.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct MentorSession {
    pub id: String,
    pub mentor_id: String,
    pub title: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub program_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewSessionParams {
    pub mentor_id: String,
    pub title: Option<String>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
    pub program_id: Option<String>,
}

impl MentorSession {
    pub fn new(params: NewSessionParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            mentor_id: params.mentor_id,
            title: params.title,
            start_time: params.start,
            end_time: params.end,
            price_cents: params.price_cents,
            program_id: params.program_id,
            created_at: Utc::now(),
        }
    }
}
