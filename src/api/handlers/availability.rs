use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use chrono_tz::Tz;
use crate::state::AppState;
use crate::api::dtos::requests::AvailabilityQuery;
use crate::error::AppError;
use std::sync::Arc;

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(mentor_id): Path<String>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tz: Tz = match params.tz.as_deref() {
        Some(name) => name.parse().map_err(|_| AppError::Validation("Invalid timezone".into()))?,
        None => state.default_timezone,
    };

    let report = state.availability.compute_availability(&mentor_id, tz).await?;
    Ok(Json(report))
}
