//! Maps failures of a booking request to HTTP responses.

use crate::backend::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required.";
pub const SLOT_CONFLICT_MESSAGE: &str =
    "This time slot is no longer available. Please select another time.";

#[derive(Debug, Error)]
pub enum AppError {
    /// The request lacks a required field. The detail is logged only, the
    /// client always gets [`MISSING_FIELDS_MESSAGE`].
    #[error("invalid booking request: {0}")]
    Validation(String),
    #[error("slot is already booked")]
    SlotConflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(detail) => {
                info!(%detail, "Rejected booking request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(Message {
                        message: MISSING_FIELDS_MESSAGE,
                    }),
                )
                    .into_response()
            }
            AppError::SlotConflict => (
                StatusCode::CONFLICT,
                Json(Message {
                    message: SLOT_CONFLICT_MESSAGE,
                }),
            )
                .into_response(),
            err @ (AppError::Storage(_) | AppError::Internal(_)) => {
                error!(%err, "Booking request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        }
    }
}
