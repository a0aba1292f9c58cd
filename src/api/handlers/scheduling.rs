use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateBookingRequest, CreateProgramRequest, CreateSessionRequest};
use crate::domain::models::{booking::BookingTarget, session::NewSessionParams};
use crate::error::AppError;
use std::sync::Arc;

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Path(mentor_id): Path<String>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.scheduling.schedule_session(NewSessionParams {
        mentor_id,
        title: payload.title,
        start: payload.start_time,
        end: payload.end_time,
        price_cents: payload.price_cents,
        program_id: payload.program_id,
    }).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_program(
    State(state): State<Arc<AppState>>,
    Path(mentor_id): Path<String>,
    Json(payload): Json<CreateProgramRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.scheduling
        .create_program(mentor_id, payload.title, payload.total_price_cents, payload.capacity)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let target = match (payload.session_id, payload.program_id) {
        (Some(session_id), None) => BookingTarget::Session(session_id),
        (None, Some(program_id)) => BookingTarget::Program(program_id),
        _ => return Err(AppError::Validation("Provide exactly one of session_id or program_id".into())),
    };

    let created = state.scheduling.book(target, payload.participant_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
