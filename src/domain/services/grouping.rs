use std::collections::HashMap;
use crate::domain::models::group::{GroupKey, SessionGroup};
use crate::domain::models::session::MentorSession;

/// Buckets sessions into offerings. Every session lands in exactly one group;
/// groups come back ordered by their earliest session, ties by first appearance.
pub fn group_sessions(sessions: &[MentorSession]) -> Vec<SessionGroup> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<SessionGroup> = Vec::new();

    for session in sessions {
        let key = GroupKey::for_session(session);
        match index.get(&key) {
            Some(&pos) => {
                let group = &mut groups[pos];
                if group.title.is_none() {
                    group.title = session.title.clone();
                }
                if group.price_cents.is_none() {
                    group.price_cents = session.price_cents;
                }
                group.sessions.push(session.clone());
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(SessionGroup::new(key, session.clone()));
            }
        }
    }

    for group in &mut groups {
        group.sessions.sort_by_key(|s| s.start_time);
    }
    // stable: equal starts keep insertion order
    groups.sort_by_key(|g| g.earliest_start());
    groups
}
