/// Published by the write path whenever a mentor's availability may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityEvent {
    SessionScheduled { mentor_id: String },
    ProgramCreated { mentor_id: String },
    BookingConfirmed { mentor_id: String },
}

impl AvailabilityEvent {
    pub fn mentor_id(&self) -> &str {
        match self {
            AvailabilityEvent::SessionScheduled { mentor_id }
            | AvailabilityEvent::ProgramCreated { mentor_id }
            | AvailabilityEvent::BookingConfirmed { mentor_id } => mentor_id.as_str(),
        }
    }
}
