use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use futures::future::try_join_all;
use tracing::{debug, warn};
use crate::domain::models::{
    booking::BookingFilter,
    group::{GroupKey, ResolvedGroup, SessionGroup, DEFAULT_SESSION_TITLE},
    program::Program,
};
use crate::domain::ports::{BookingRepository, ProgramRepository};
use crate::error::AppError;

/// Runs one store call under `limit`; an expired call is a transient failure.
pub async fn bounded<T, F>(limit: Duration, what: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout(format!("{} exceeded {}ms", what, limit.as_millis()))),
    }
}

/// Attaches capacity and confirmed-booking counts to groups.
///
/// Counts are read without locks and are for display only. Booking creation
/// re-checks capacity on its own.
pub struct CapacityResolver {
    program_repo: Arc<dyn ProgramRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    lookup_timeout: Duration,
}

impl CapacityResolver {
    pub fn new(
        program_repo: Arc<dyn ProgramRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        lookup_timeout: Duration,
    ) -> Self {
        Self { program_repo, booking_repo, lookup_timeout }
    }

    /// Program lookup and every booking count are issued together. A failed
    /// program lookup only drops capacities; a failed count fails the whole call.
    pub async fn resolve(&self, groups: Vec<SessionGroup>) -> Result<Vec<ResolvedGroup>, AppError> {
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let mut program_ids: Vec<String> = Vec::new();
        for id in groups.iter().filter_map(|g| g.key.program_id()) {
            if !program_ids.iter().any(|known| known == id) {
                program_ids.push(id.to_string());
            }
        }

        let (programs, counts) = tokio::join!(
            self.load_programs(&program_ids),
            try_join_all(groups.iter().map(|g| self.count_joined(g))),
        );
        let counts = counts?;

        Ok(groups
            .into_iter()
            .zip(counts)
            .map(|(group, joined)| attach(group, joined, &programs))
            .collect())
    }

    async fn load_programs(&self, ids: &[String]) -> HashMap<String, Program> {
        if ids.is_empty() {
            return HashMap::new();
        }

        match bounded(self.lookup_timeout, "program lookup", self.program_repo.find_by_ids(ids)).await {
            Ok(programs) => {
                if programs.len() < ids.len() {
                    warn!("{} of {} programs could not be found", ids.len() - programs.len(), ids.len());
                }
                programs.into_iter().map(|p| (p.id.clone(), p)).collect()
            }
            Err(e) => {
                warn!("Program lookup failed, presenting groups without capacity: {}", e);
                HashMap::new()
            }
        }
    }

    async fn count_joined(&self, group: &SessionGroup) -> Result<i64, AppError> {
        let filter = match &group.key {
            GroupKey::Program { program_id } => BookingFilter::Program(program_id.clone()),
            GroupKey::AdHoc { .. } => BookingFilter::SessionIn(group.session_ids()),
        };
        let joined = bounded(self.lookup_timeout, "booking count", self.booking_repo.count_confirmed(&filter)).await?;
        debug!(?filter, joined, "Counted confirmed bookings");
        Ok(joined)
    }
}

fn attach(group: SessionGroup, joined: i64, programs: &HashMap<String, Program>) -> ResolvedGroup {
    let fallback_title = group.title.clone().unwrap_or_else(|| DEFAULT_SESSION_TITLE.to_string());
    let program = group.key.program_id().and_then(|id| programs.get(id));

    match program {
        Some(program) => ResolvedGroup {
            title: program.title.clone(),
            price_total_cents: Some(program.total_price_cents),
            capacity: Some(i64::from(program.capacity)),
            joined,
            group,
        },
        None => ResolvedGroup {
            title: fallback_title,
            price_total_cents: group.price_cents,
            capacity: None,
            joined,
            group,
        },
    }
}
