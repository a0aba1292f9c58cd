use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Timed out: {0}")]
    Timeout(String),
}

impl AppError {
    /// Failures that clear up by re-running the same read.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Timeout(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                error!("Database error: {:?}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "Backend unavailable, retry later".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Timeout(msg) => {
                warn!("Transient failure: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Backend unavailable, retry later".to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "retryable": self.is_transient(),
        }));

        (status, body).into_response()
    }
}
