use std::collections::HashMap;
use std::time::{Duration, Instant};
use parking_lot::Mutex;
use tracing::debug;
use crate::domain::models::availability::AvailabilityReport;

struct Entry {
    report: AvailabilityReport,
    expires_at: Instant,
}

/// Snapshot of a mentor's invalidation count, taken before computing a report.
/// A report is only stored if no invalidation happened since.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    epoch: u64,
    mentor: u64,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<(String, String), Entry>,
    generations: HashMap<String, u64>,
    epoch: u64,
}

/// Short-lived reports keyed by (mentor, timezone). A zero TTL disables caching.
pub struct AvailabilityCache {
    ttl: Duration,
    inner: Mutex<Inner>,
}

impl AvailabilityCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, inner: Mutex::new(Inner::default()) }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn get(&self, mentor_id: &str, timezone: &str) -> Option<AvailabilityReport> {
        if !self.is_enabled() {
            return None;
        }
        let key = (mentor_id.to_string(), timezone.to_string());
        let mut inner = self.inner.lock();
        let now = Instant::now();
        if inner.entries.get(&key).is_some_and(|entry| entry.expires_at <= now) {
            inner.entries.remove(&key);
            return None;
        }
        inner.entries.get(&key).map(|entry| entry.report.clone())
    }

    pub fn generation(&self, mentor_id: &str) -> Generation {
        let inner = self.inner.lock();
        Generation {
            epoch: inner.epoch,
            mentor: inner.generations.get(mentor_id).copied().unwrap_or(0),
        }
    }

    /// Stores `report` unless its mentor was invalidated after `seen` was taken.
    /// Returns whether the report was stored.
    pub fn put(&self, report: &AvailabilityReport, seen: Generation) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let mut inner = self.inner.lock();
        let current = Generation {
            epoch: inner.epoch,
            mentor: inner.generations.get(&report.mentor_id).copied().unwrap_or(0),
        };
        if current != seen {
            debug!(mentor_id = %report.mentor_id, "Discarding availability computed before an invalidation");
            return false;
        }
        let key = (report.mentor_id.clone(), report.timezone.clone());
        inner.entries.insert(key, Entry {
            report: report.clone(),
            expires_at: Instant::now() + self.ttl,
        });
        true
    }

    /// Drops every cached report of the mentor, across timezones, and
    /// invalidates reports still being computed for it.
    pub fn invalidate(&self, mentor_id: &str) {
        let mut inner = self.inner.lock();
        *inner.generations.entry(mentor_id.to_string()).or_insert(0) += 1;
        let before = inner.entries.len();
        inner.entries.retain(|(mentor, _), _| mentor != mentor_id);
        debug!(mentor_id, evicted = before - inner.entries.len(), "Invalidated availability cache");
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.epoch += 1;
        inner.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
