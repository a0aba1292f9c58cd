use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};
use crate::domain::models::availability::AvailabilityReport;
use crate::domain::ports::{BookingRepository, ProgramRepository, SessionRepository};
use crate::domain::services::cache::AvailabilityCache;
use crate::domain::services::capacity::{bounded, CapacityResolver};
use crate::domain::services::grouping::group_sessions;
use crate::domain::services::presenter::build_report;
use crate::error::AppError;

/// Fetch, group, resolve and present a mentor's upcoming offerings.
pub struct AvailabilityService {
    session_repo: Arc<dyn SessionRepository>,
    resolver: CapacityResolver,
    cache: Arc<AvailabilityCache>,
    lookup_timeout: Duration,
}

impl AvailabilityService {
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        program_repo: Arc<dyn ProgramRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        cache: Arc<AvailabilityCache>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            session_repo,
            resolver: CapacityResolver::new(program_repo, booking_repo, lookup_timeout),
            cache,
            lookup_timeout,
        }
    }

    pub fn cache(&self) -> Arc<AvailabilityCache> {
        self.cache.clone()
    }

    pub async fn compute_availability(&self, mentor_id: &str, tz: Tz) -> Result<AvailabilityReport, AppError> {
        if let Some(hit) = self.cache.get(mentor_id, tz.name()) {
            debug!(mentor_id, "Availability served from cache");
            return Ok(hit);
        }

        let seen = self.cache.generation(mentor_id);
        let report = self.compute_at(mentor_id, tz, Utc::now()).await?;
        self.cache.put(&report, seen);
        Ok(report)
    }

    /// Uncached pipeline run against an explicit clock.
    pub async fn compute_at(&self, mentor_id: &str, tz: Tz, now: DateTime<Utc>) -> Result<AvailabilityReport, AppError> {
        let sessions = bounded(
            self.lookup_timeout,
            "session fetch",
            self.session_repo.list_future_by_mentor(mentor_id, now),
        ).await?;

        let groups = group_sessions(&sessions);
        let resolved = self.resolver.resolve(groups).await?;
        let report = build_report(mentor_id, tz, &sessions, &resolved);

        info!(
            mentor_id,
            sessions = sessions.len(),
            groups = report.groups.len(),
            total_joined = report.total_joined,
            "Computed availability"
        );
        Ok(report)
    }
}
