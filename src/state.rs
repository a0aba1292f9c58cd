use std::sync::Arc;
use chrono_tz::Tz;
use tokio::sync::broadcast;
use crate::domain::models::events::AvailabilityEvent;
use crate::domain::services::{availability::AvailabilityService, scheduling::SchedulingService};

#[derive(Clone)]
pub struct AppState {
    pub default_timezone: Tz,
    pub availability: Arc<AvailabilityService>,
    pub scheduling: Arc<SchedulingService>,
    pub events: broadcast::Sender<AvailabilityEvent>,
}
