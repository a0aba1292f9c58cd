use chrono::{DateTime, Utc};
use crate::domain::models::session::MentorSession;

pub const DEFAULT_SESSION_TITLE: &str = "Session";

/// Identity of an offering. Compared structurally, so titles may contain any
/// characters without colliding with another group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Program { program_id: String },
    AdHoc { title: String, price_cents: i64 },
}

impl GroupKey {
    pub fn for_session(session: &MentorSession) -> Self {
        match &session.program_id {
            Some(program_id) => GroupKey::Program { program_id: program_id.clone() },
            None => GroupKey::AdHoc {
                title: session.title.as_deref().unwrap_or_default().to_lowercase(),
                price_cents: session.price_cents.unwrap_or(0),
            },
        }
    }

    pub fn program_id(&self) -> Option<&str> {
        match self {
            GroupKey::Program { program_id } => Some(program_id.as_str()),
            GroupKey::AdHoc { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionGroup {
    pub key: GroupKey,
    pub title: Option<String>,
    pub price_cents: Option<i64>,
    pub sessions: Vec<MentorSession>,
}

impl SessionGroup {
    pub fn new(key: GroupKey, first: MentorSession) -> Self {
        Self {
            key,
            title: first.title.clone(),
            price_cents: first.price_cents,
            sessions: vec![first],
        }
    }

    pub fn earliest_start(&self) -> Option<DateTime<Utc>> {
        self.sessions.iter().map(|s| s.start_time).min()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|s| s.id.clone()).collect()
    }
}

/// A group after program and booking lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGroup {
    pub group: SessionGroup,
    pub title: String,
    pub price_total_cents: Option<i64>,
    pub capacity: Option<i64>,
    pub joined: i64,
}
