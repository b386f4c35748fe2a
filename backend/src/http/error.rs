//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::ObservationError;

/// Reason returned with a 400 for unusable coordinates.
pub const INVALID_COORDINATES: &str = "Latitude and/or longitude invalid.";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request; answered in plain text
    BadRequest(String),
    /// Unknown route or format
    NotFound(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(ApiError::new("NOT_FOUND", msg)),
            )
                .into_response(),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("INTERNAL_ERROR", msg)),
            )
                .into_response(),
        }
    }
}

impl From<ObservationError> for AppError {
    fn from(err: ObservationError) -> Self {
        match err {
            ObservationError::InvalidObserver(_) => {
                AppError::BadRequest(INVALID_COORDINATES.to_string())
            }
            ObservationError::Task(e) => AppError::Internal(format!("Task join error: {}", e)),
        }
    }
}
