//! # API Error Types
//!
//! Translates layer errors into HTTP responses.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Translation                                    │
//! │                                                                         │
//! │  ValidationError ────────► 400  validation_error                       │
//! │  DbError::NotFound ──────► 404  not_found                              │
//! │  DbError::SeatAlreadyBooked ► 409  conflict                            │
//! │  DbError::UniqueViolation ─► 409  conflict                             │
//! │  bad credentials ────────► 401  unauthorized                           │
//! │  everything else ────────► 500  internal_error (details logged only)   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Response body is always `{ "code": "...", "message": "..." }`. Storage
//! detail never reaches the client; internal errors are logged in full and
//! surfaced opaque.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use busline_core::ValidationError;
use busline_db::DbError;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable code for the response body.
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Never leak internals to the client
            ApiError::Internal(detail) => {
                tracing::error!(detail, "Internal server error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "code": self.code(),
            "message": message,
        }));

        (self.status(), body).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DbError::SeatAlreadyBooked { .. } => ApiError::Conflict(err.to_string()),
            DbError::UniqueViolation { .. } => ApiError::Conflict(err.to_string()),
            // FK failures mean the referenced user/bus does not exist
            DbError::ForeignKeyViolation { .. } => {
                ApiError::NotFound("Referenced user or bus does not exist".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        let err: ApiError = DbError::SeatAlreadyBooked { bus_id: 1, seat_no: 7 }.into();
        assert!(matches!(err, ApiError::Conflict(_)));
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err: ApiError = DbError::not_found("Bus", 42).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = DbError::Internal("pool broke".into()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "internal_error");
    }
}
