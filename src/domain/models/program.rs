use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Program {
    pub id: String,
    pub mentor_id: String,
    pub title: String,
    pub total_price_cents: i64,
    pub capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl Program {
    pub fn new(mentor_id: String, title: String, total_price_cents: i64, capacity: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            mentor_id,
            title,
            total_price_cents,
            capacity,
            created_at: Utc::now(),
        }
    }
}
