use crate::domain::{models::program::Program, ports::ProgramRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteProgramRepo {
    pool: SqlitePool,
}

impl SqliteProgramRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgramRepository for SqliteProgramRepo {
    async fn create(&self, program: &Program) -> Result<Program, AppError> {
        sqlx::query_as::<_, Program>(
            r#"INSERT INTO programs (id, mentor_id, title, total_price_cents, capacity, created_at)
               VALUES (?, ?, ?, ?, ?, ?)
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
        sqlx::query_as::<_, Program>("SELECT * FROM programs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Program>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM programs WHERE id IN (");
        let mut list = qb.separated(", ");
        for id in ids {
            list.push_bind(id.as_str());
        }
        list.push_unseparated(")");

        qb.build_query_as::<Program>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
