use std::collections::BTreeSet;
use chrono::Datelike;
use chrono_tz::Tz;
use crate::domain::models::availability::{AvailabilityReport, GroupView, SessionSummary};
use crate::domain::models::group::ResolvedGroup;
use crate::domain::models::session::MentorSession;

pub const EMPTY_SUMMARY: &str = "no upcoming sessions";

const WEEKDAY_NAMES: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// Distinct weekdays on which a session starts, by the viewer's local calendar,
/// Monday first.
pub fn available_weekdays(sessions: &[MentorSession], tz: Tz) -> Vec<String> {
    let days: BTreeSet<u32> = sessions
        .iter()
        .map(|s| s.start_time.with_timezone(&tz).weekday().num_days_from_monday())
        .collect();

    days.into_iter()
        .map(|d| WEEKDAY_NAMES[d as usize].to_string())
        .collect()
}

pub fn seats_left(capacity: i64, joined: i64) -> i64 {
    (capacity - joined).max(0)
}

pub fn availability_label(joined: i64, capacity: Option<i64>) -> String {
    match capacity {
        Some(cap) => format!("{} joined / {} total · {} left", joined, cap, seats_left(cap, joined)),
        None => format!("{} joined", joined),
    }
}

pub fn summary_label(total_joined: i64, total_capacity: Option<i64>, group_count: usize) -> String {
    if group_count == 0 {
        return EMPTY_SUMMARY.to_string();
    }
    match total_capacity {
        Some(total) => format!("{} joined / {} total", total_joined, total),
        None => format!("{} joined", total_joined),
    }
}

/// Headline totals. Undefined capacities add nothing; the total itself is
/// undefined when no group has a capacity.
pub fn totals(groups: &[GroupView]) -> (Option<i64>, i64) {
    let total_joined: i64 = groups.iter().map(|g| g.joined).sum();
    let total_capacity = groups
        .iter()
        .filter_map(|g| g.capacity)
        .fold(None, |acc: Option<i64>, cap| Some(acc.unwrap_or(0) + cap));
    (total_capacity, total_joined)
}

pub fn group_view(resolved: &ResolvedGroup) -> GroupView {
    let seats = resolved.capacity.map(|cap| seats_left(cap, resolved.joined));
    GroupView {
        title: resolved.title.clone(),
        price_total_cents: resolved.price_total_cents,
        capacity: resolved.capacity,
        joined: resolved.joined,
        seats_left: seats,
        label: availability_label(resolved.joined, resolved.capacity),
        sessions: resolved
            .group
            .sessions
            .iter()
            .map(|s| SessionSummary {
                id: s.id.clone(),
                title: s.title.clone(),
                start_time: s.start_time,
                end_time: s.end_time,
                price_cents: s.price_cents,
            })
            .collect(),
    }
}

pub fn build_report(
    mentor_id: &str,
    tz: Tz,
    sessions: &[MentorSession],
    resolved: &[ResolvedGroup],
) -> AvailabilityReport {
    let groups: Vec<GroupView> = resolved.iter().map(group_view).collect();
    let (total_capacity, total_joined) = totals(&groups);
    let summary = summary_label(total_joined, total_capacity, groups.len());

    AvailabilityReport {
        mentor_id: mentor_id.to_string(),
        timezone: tz.name().to_string(),
        available_weekdays: available_weekdays(sessions, tz),
        total_capacity,
        total_joined,
        groups,
        summary,
    }
}
