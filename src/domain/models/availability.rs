use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionSummary {
    pub id: String,
    pub title: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub price_cents: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GroupView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_total_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    pub joined: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_left: Option<i64>,
    pub label: String,
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AvailabilityReport {
    pub mentor_id: String,
    pub timezone: String,
    pub available_weekdays: Vec<String>,
    pub total_capacity: Option<i64>,
    pub total_joined: i64,
    pub groups: Vec<GroupView>,
    pub summary: String,
}
