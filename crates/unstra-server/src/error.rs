//! HTTP error types for the Unstra server.
//!
//! Maps signup errors into JSON responses for the API routes. Every
//! variant produces a body with a machine-readable `error` field and a
//! human-readable `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use unstra_core::SignupError;

/// Application-level error returned from API handlers.
#[derive(Debug)]
pub enum AppError {
    /// Client sent invalid input.
    BadRequest(String),
    /// A submission for this form is already in flight.
    InFlight,
    /// The waitlist store could not be reached.
    Unavailable(String),
    /// Internal server error.
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::InFlight => (
                StatusCode::CONFLICT,
                "in_flight",
                "a submission for this form is already in progress".to_owned(),
            ),
            Self::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", msg),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_owned(),
                )
            }
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<SignupError> for AppError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::Validation { .. } => Self::BadRequest(err.to_string()),
            // Conflicts become `Outcome::AlreadyJoined` before reaching here.
            SignupError::Conflict { .. } => Self::Internal(err.to_string()),
            SignupError::Transient(_) => {
                tracing::warn!(error = %err, "waitlist store unavailable");
                Self::Unavailable(err.public_message())
            }
        }
    }
}
