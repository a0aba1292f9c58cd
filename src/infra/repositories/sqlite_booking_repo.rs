use crate::domain::{models::booking::{Booking, BookingFilter}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_checked(&self, booking: &Booking, capacity: Option<i64>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // insert before counting; the write lock serializes bookings of the same program
        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, session_id, program_id, participant_id, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.session_id).bind(&booking.program_id)
            .bind(&booking.participant_id).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        if let (Some(cap), Some(program_id)) = (capacity, &booking.program_id) {
            let row = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE program_id = ? AND status = 'CONFIRMED'")
                .bind(program_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            let taken = row.get::<i64, _>("count") - 1;
            if taken >= cap {
                tx.rollback().await.map_err(AppError::Database)?;
                return Err(AppError::Conflict(format!("Program is full ({} of {} seats taken)", taken, cap)));
            }
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn count_confirmed(&self, filter: &BookingFilter) -> Result<i64, AppError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) as count FROM bookings WHERE status = 'CONFIRMED' AND ");
        match filter {
            BookingFilter::Program(program_id) => {
                qb.push("program_id = ").push_bind(program_id.as_str());
            }
            BookingFilter::SessionIn(ids) => {
                if ids.is_empty() {
                    return Ok(0);
                }
                qb.push("session_id IN (");
                let mut list = qb.separated(", ");
                for id in ids {
                    list.push_bind(id.as_str());
                }
                list.push_unseparated(")");
            }
        }

        let row = qb.build().fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }
}
