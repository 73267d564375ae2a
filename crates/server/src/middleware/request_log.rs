//! Request logging middleware for the JSON API.
//!
//! Emits one line per `/api` request with the method, path, status and
//! duration, followed by the JSON response body. Lines are capped at 80
//! characters so list responses do not flood the log. Requests outside
//! `/api` (static assets) pass through untouched.

use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Maximum length of a log line, in characters.
const MAX_LINE_CHARS: usize = 80;

/// Middleware that logs `/api` responses.
///
/// The response body is buffered to be included in the log line, then
/// handed back to the client unchanged.
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    if !request.uri().path().starts_with("/api") {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("failed to buffer response body: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut line = format!(
        "{method} {path} {} in {}ms",
        parts.status.as_u16(),
        start.elapsed().as_millis()
    );
    if !bytes.is_empty()
        && let Ok(body_text) = std::str::from_utf8(&bytes)
    {
        line.push_str(" :: ");
        line.push_str(body_text);
    }

    tracing::info!("{}", truncate_line(&line, MAX_LINE_CHARS));

    Response::from_parts(parts, Body::from(bytes))
}

/// Cap a line at `max_chars` characters, ending it with an ellipsis.
fn truncate_line(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        return line.to_owned();
    }

    let mut truncated: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
