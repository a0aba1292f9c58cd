use crate::domain::{models::program::Program, ports::ProgramRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresProgramRepo {
    pool: PgPool,
}

impl PostgresProgramRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgramRepository for PostgresProgramRepo {
    async fn create(&self, program: &Program) -> Result<Program, AppError> {
        sqlx::query_as::<_, Program>(
            r#"INSERT INTO programs (id, mentor_id, title, total_price_cents, capacity, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#
        )
            .bind(&program.id)
            .bind(&program.mentor_id)
            .bind(&program.title)
            .bind(program.total_price_cents)
            .bind(program.capacity)
            .bind(program.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Program>, AppError> {
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Program>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
