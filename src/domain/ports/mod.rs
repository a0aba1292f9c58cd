use crate::domain::models::{
    booking::{Booking, BookingFilter}, program::Program, session::MentorSession,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &MentorSession) -> Result<MentorSession, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<MentorSession>, AppError>;
    /// Sessions starting at or after `now`, ascending by start time.
    async fn list_future_by_mentor(&self, mentor_id: &str, now: DateTime<Utc>) -> Result<Vec<MentorSession>, AppError>;
}

#[async_trait]
pub trait ProgramRepository: Send + Sync {
    async fn create(&self, program: &Program) -> Result<Program, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Program>, AppError>;
    /// Unknown ids are skipped, not reported.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Program>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a booking. With `capacity`, the confirmed count for the booking's
    /// program is re-read in the same transaction and a full program is a `Conflict`.
    async fn create_checked(&self, booking: &Booking, capacity: Option<i64>) -> Result<Booking, AppError>;
    async fn count_confirmed(&self, filter: &BookingFilter) -> Result<i64, AppError>;
}
