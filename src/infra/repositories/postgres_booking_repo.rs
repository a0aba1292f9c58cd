use crate::domain::{models::booking::{Booking, BookingFilter}, ports::BookingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create_checked(&self, booking: &Booking, capacity: Option<i64>) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        if let (Some(cap), Some(program_id)) = (capacity, &booking.program_id) {
            // serialize concurrent bookings of the same program
            sqlx::query("SELECT id FROM programs WHERE id = $1 FOR UPDATE")
                .bind(program_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?
                .ok_or(AppError::NotFound("Program not found".into()))?;

            let row = sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE program_id = $1 AND status = 'CONFIRMED'")
                .bind(program_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            let taken = row.get::<i64, _>("count");
            if taken >= cap {
                return Err(AppError::Conflict(format!("Program is full ({} of {} seats taken)", taken, cap)));
            }
        }

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, session_id, program_id, participant_id, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.session_id).bind(&booking.program_id)
            .bind(&booking.participant_id).bind(&booking.status).bind(booking.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn count_confirmed(&self, filter: &BookingFilter) -> Result<i64, AppError> {
        let row = match filter {
            BookingFilter::Program(program_id) => {
                sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE status = 'CONFIRMED' AND program_id = $1")
                    .bind(program_id)
                    .fetch_one(&self.pool)
                    .await
            }
            BookingFilter::SessionIn(ids) => {
                if ids.is_empty() {
                    return Ok(0);
                }
                sqlx::query("SELECT COUNT(*) as count FROM bookings WHERE status = 'CONFIRMED' AND session_id = ANY($1)")
                    .bind(ids)
                    .fetch_one(&self.pool)
                    .await
            }
        }.map_err(AppError::Database)?;

        Ok(row.get::<i64, _>("count"))
    }
}
