use crate::domain::{models::session::MentorSession, ports::SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::{DateTime, Utc};

pub struct PostgresSessionRepo {
    pool: PgPool,
}

impl PostgresSessionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepo {
    async fn create(&self, session: &MentorSession) -> Result<MentorSession, AppError> {
        sqlx::query_as::<_, MentorSession>(
            r#"INSERT INTO mentor_sessions (id, mentor_id, title, start_time, end_time, price_cents, program_id, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING *"#
        )
            .bind(&session.id)
            .bind(&session.mentor_id)
            .bind(&session.title)
            .bind(session.start_time)
            .bind(session.end_time)
            .bind(session.price_cents)
            .bind(&session.program_id)
            .bind(session.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MentorSession>, AppError> {
        sqlx::query_as::<_, MentorSession>(
            "SELECT * FROM mentor_sessions WHERE id = $1"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_future_by_mentor(&self, mentor_id: &str, now: DateTime<Utc>) -> Result<Vec<MentorSession>, AppError> {
        sqlx::query_as::<_, MentorSession>(
            "SELECT * FROM mentor_sessions WHERE mentor_id = $1 AND start_time >= $2 ORDER BY start_time ASC, created_at ASC"
        )
            .bind(mentor_id)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
