//! Unified error handling with Sentry integration.
//!
//! Provides a unified [`AppError`] type that captures server errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`, and every error body has the same JSON shape:
//! `{"message": "..."}`.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the server.
///
/// Client-facing messages are carried verbatim in the variant; internal
/// detail only reaches logs and Sentry.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from client (validation failure, malformed body).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal failure with a client-safe message and the source detail.
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl AppError {
    /// Wrap an internal failure, keeping the source for logs only.
    pub fn internal(message: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::Internal {
            message: message.into(),
            detail: source.to_string(),
        }
    }
}

/// JSON body used for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if let Self::Internal { message, detail } = &self {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %detail,
                public_message = %message,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Internal { message, .. } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, axum::Json(ErrorBody { message })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON extractor whose rejection is rendered as a `{"message"}` body.
///
/// The stock `Json` extractor rejects with a plain-text body; this API
/// answers every failure in its JSON error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
