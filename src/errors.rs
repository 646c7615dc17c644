use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::session::BookingError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Booking(BookingError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            AppError::Booking(BookingError::IncompleteDraft { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Booking(BookingError::PreconditionViolation(_)) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        tracing::warn!(error = %self, status = status.as_u16(), "request refused");

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
