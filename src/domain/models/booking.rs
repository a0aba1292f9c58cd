use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const STATUS_CONFIRMED: &str = "CONFIRMED";
pub const STATUS_CANCELLED: &str = "CANCELLED";

/// A reservation against exactly one session or one program.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub session_id: Option<String>,
    pub program_id: Option<String>,
    pub participant_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum BookingTarget {
    Session(String),
    Program(String),
}

impl Booking {
    pub fn new(target: BookingTarget, participant_id: String) -> Self {
        let (session_id, program_id) = match target {
            BookingTarget::Session(id) => (Some(id), None),
            BookingTarget::Program(id) => (None, Some(id)),
        };

        Self {
            id: Uuid::new_v4().to_string(),
            session_id,
            program_id,
            participant_id,
            status: STATUS_CONFIRMED.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Which confirmed bookings to count toward a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingFilter {
    Program(String),
    SessionIn(Vec<String>),
}
