//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::booking::BookingError;
use crate::db::DatabaseError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),
    #[error("Store unavailable")]
    StoreUnavailable,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::InvalidDate(detail) => (
                StatusCode::BAD_REQUEST,
                "INVALID_DATE",
                format!("Invalid date or time: {detail}"),
            ),
            ApiError::SlotUnavailable(detail) => (
                StatusCode::CONFLICT,
                "SLOT_UNAVAILABLE",
                format!("Slot unavailable: {detail}"),
            ),
            ApiError::StoreUnavailable => {
                // Operational failure: logged here, generic to the client,
                // retry decision left to the caller.
                tracing::warn!("store unavailable, request rejected");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "Storage temporarily unavailable, try again".to_string(),
                )
            }
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidDate(s) => ApiError::InvalidDate(s),
            BookingError::SlotUnavailable { data, hora } => {
                ApiError::SlotUnavailable(format!("{data} {hora}"))
            }
            BookingError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} {id}"))
            }
            BookingError::StoreUnavailable => ApiError::StoreUnavailable,
            BookingError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        if err.is_busy() {
            ApiError::StoreUnavailable
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}
