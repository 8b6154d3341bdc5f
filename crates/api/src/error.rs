//! Unified error handling with Sentry integration.
//!
//! Every failure leaves the service as the same JSON envelope:
//!
//! ```json
//! { "error": { "message": "...", "code": "...", "status": true }, "data": {} }
//! ```
//!
//! The HTTP status equals the error's numeric code. Server errors are
//! captured to Sentry before responding. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ProfileError;
use crate::validation::ValidationErrors;

/// Code reported for malformed or structurally invalid requests.
pub const BAD_REQUEST_CODE: &str = "bad.request";

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Profile creation failed at a named step.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The request body failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The request body could not be read as JSON.
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Profile(err) => err.status(),
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Profile(err) => err.code(),
            Self::Validation(_) | Self::BadRequest(_) => BAD_REQUEST_CODE,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
    data: EmptyData,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: String,
    code: &'a str,
    status: bool,
}

/// Serializes as `{}`.
#[derive(Debug, Serialize)]
struct EmptyData {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                code = self.code(),
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let envelope = ErrorEnvelope {
            error: ErrorBody {
                message: self.to_string(),
                code: self.code(),
                status: true,
            },
            data: EmptyData {},
        };

        (status, Json(envelope)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
