use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use crate::domain::models::{
    booking::{Booking, BookingFilter, STATUS_CONFIRMED}, program::Program, session::MentorSession,
};
use crate::domain::ports::{BookingRepository, ProgramRepository, SessionRepository};
use crate::error::AppError;

/// What the SQL `count_confirmed` queries select.
fn counted(filter: &BookingFilter, booking: &Booking) -> bool {
    if booking.status != STATUS_CONFIRMED {
        return false;
    }
    match filter {
        BookingFilter::Program(id) => booking.program_id.as_deref() == Some(id.as_str()),
        BookingFilter::SessionIn(ids) => booking
            .session_id
            .as_ref()
            .is_some_and(|sid| ids.contains(sid)),
    }
}

#[derive(Default)]
pub struct FakeSessions {
    pub rows: Mutex<Vec<MentorSession>>,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl SessionRepository for FakeSessions {
    async fn create(&self, session: &MentorSession) -> Result<MentorSession, AppError> {
        self.rows.lock().push(session.clone());
        Ok(session.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MentorSession>, AppError> {
        Ok(self.rows.lock().iter().find(|s| s.id == id).cloned())
    }

    async fn list_future_by_mentor(&self, mentor_id: &str, now: DateTime<Utc>) -> Result<Vec<MentorSession>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut rows: Vec<MentorSession> = self.rows.lock()
            .iter()
            .filter(|s| s.mentor_id == mentor_id && s.start_time >= now)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.start_time);
        Ok(rows)
    }
}

#[derive(Default)]
pub struct FakePrograms {
    pub rows: Mutex<Vec<Program>>,
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl ProgramRepository for FakePrograms {
    async fn create(&self, program: &Program) -> Result<Program, AppError> {
        self.rows.lock().push(program.clone());
        Ok(program.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Program>, AppError> {
        Ok(self.rows.lock().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Program>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows.lock().iter().filter(|p| ids.contains(&p.id)).cloned().collect())
    }
}

#[derive(Default)]
pub struct FakeBookings {
    pub rows: Mutex<Vec<Booking>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl BookingRepository for FakeBookings {
    async fn create_checked(&self, booking: &Booking, capacity: Option<i64>) -> Result<Booking, AppError> {
        let mut rows = self.rows.lock();
        if let (Some(cap), Some(program_id)) = (capacity, &booking.program_id) {
            let filter = BookingFilter::Program(program_id.clone());
            let taken = rows.iter().filter(|b| counted(&filter, b)).count() as i64;
            if taken >= cap {
                return Err(AppError::Conflict("Program is full".into()));
            }
        }
        rows.push(booking.clone());
        Ok(booking.clone())
    }

    async fn count_confirmed(&self, filter: &BookingFilter) -> Result<i64, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.rows.lock().iter().filter(|b| counted(filter, b)).count() as i64)
    }
}
