use std::sync::Arc;
use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info};
use crate::domain::models::{
    booking::{Booking, BookingTarget},
    events::AvailabilityEvent,
    program::Program,
    session::{MentorSession, NewSessionParams},
};
use crate::domain::ports::{BookingRepository, ProgramRepository, SessionRepository};
use crate::error::AppError;

/// Write side: scheduling sessions, creating programs and booking them.
/// Each successful write announces an [`AvailabilityEvent`].
pub struct SchedulingService {
    session_repo: Arc<dyn SessionRepository>,
    program_repo: Arc<dyn ProgramRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    events: broadcast::Sender<AvailabilityEvent>,
}

impl SchedulingService {
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        program_repo: Arc<dyn ProgramRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        events: broadcast::Sender<AvailabilityEvent>,
    ) -> Self {
        Self { session_repo, program_repo, booking_repo, events }
    }

    pub async fn schedule_session(&self, mut params: NewSessionParams) -> Result<MentorSession, AppError> {
        if params.start <= Utc::now() {
            return Err(AppError::Validation("Session must start in the future".into()));
        }
        if params.end.is_some_and(|end| end <= params.start) {
            return Err(AppError::Validation("End time must be after start time".into()));
        }
        if params.price_cents.is_some_and(|p| p < 0) {
            return Err(AppError::Validation("Price must not be negative".into()));
        }
        params.title = params.title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if let Some(program_id) = &params.program_id {
            let program = self.program_repo.find_by_id(program_id).await?
                .ok_or(AppError::NotFound("Program not found".into()))?;
            if program.mentor_id != params.mentor_id {
                return Err(AppError::Validation("Program belongs to another mentor".into()));
            }
        }

        let created = self.session_repo.create(&MentorSession::new(params)).await?;
        info!(mentor_id = %created.mentor_id, session_id = %created.id, "Scheduled session");
        self.publish(AvailabilityEvent::SessionScheduled { mentor_id: created.mentor_id.clone() });
        Ok(created)
    }

    pub async fn create_program(
        &self,
        mentor_id: String,
        title: String,
        total_price_cents: i64,
        capacity: i32,
    ) -> Result<Program, AppError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("Program title is required".into()));
        }
        if capacity < 1 {
            return Err(AppError::Validation("Capacity must be at least 1".into()));
        }
        if total_price_cents < 0 {
            return Err(AppError::Validation("Price must not be negative".into()));
        }

        let created = self.program_repo.create(&Program::new(mentor_id, title, total_price_cents, capacity)).await?;
        info!(mentor_id = %created.mentor_id, program_id = %created.id, "Created program");
        self.publish(AvailabilityEvent::ProgramCreated { mentor_id: created.mentor_id.clone() });
        Ok(created)
    }

    /// Program bookings are capacity-checked inside the store transaction;
    /// standalone sessions carry no capacity. Booking a session that belongs
    /// to a program books a seat in that program.
    pub async fn book(&self, target: BookingTarget, participant_id: String) -> Result<Booking, AppError> {
        if participant_id.trim().is_empty() {
            return Err(AppError::Validation("Participant is required".into()));
        }

        let (target, mentor_id, capacity) = match target {
            BookingTarget::Session(id) => {
                let session = self.session_repo.find_by_id(&id).await?
                    .ok_or(AppError::NotFound("Session not found".into()))?;
                if session.start_time <= Utc::now() {
                    return Err(AppError::Conflict("Session has already started".into()));
                }
                match session.program_id {
                    Some(program_id) => {
                        debug!(session_id = %id, program_id = %program_id, "Session belongs to a program, booking the program");
                        let program = self.program_repo.find_by_id(&program_id).await?
                            .ok_or(AppError::NotFound("Program not found".into()))?;
                        (BookingTarget::Program(program_id), program.mentor_id, Some(i64::from(program.capacity)))
                    }
                    None => (BookingTarget::Session(id), session.mentor_id, None),
                }
            }
            BookingTarget::Program(id) => {
                let program = self.program_repo.find_by_id(&id).await?
                    .ok_or(AppError::NotFound("Program not found".into()))?;
                (BookingTarget::Program(id), program.mentor_id, Some(i64::from(program.capacity)))
            }
        };

        let booking = Booking::new(target, participant_id);
        let created = self.booking_repo.create_checked(&booking, capacity).await?;
        info!(mentor_id = %mentor_id, booking_id = %created.id, "Booking confirmed");
        self.publish(AvailabilityEvent::BookingConfirmed { mentor_id });
        Ok(created)
    }

    fn publish(&self, event: AvailabilityEvent) {
        if self.events.send(event).is_err() {
            debug!("No availability listeners");
        }
    }
}
