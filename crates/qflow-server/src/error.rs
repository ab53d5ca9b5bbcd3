//! Error types for the HTTP API.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use qflow_runner::RunnerError;
use serde::Serialize;

/// API error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Failure inside circuit construction or execution.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// Request body that does not satisfy the request schema.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Runner(RunnerError::InvalidGateSpec { .. }) => "invalid_gate_spec",
            ApiError::Runner(RunnerError::InvalidAngle { .. }) => "invalid_angle",
            ApiError::Runner(RunnerError::BackendUnavailable { .. }) => "backend_unavailable",
            ApiError::Runner(RunnerError::SnapshotComputationFailed { .. }) => "snapshot_failed",
            ApiError::Runner(_) => "execution_failed",
            ApiError::Validation(_) => "validation_error",
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Runner(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::warn!(code = self.code(), "Request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            detail: self.to_string(),
            error: self.code(),
        });

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
