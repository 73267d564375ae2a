//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. Request log (one line per `/api` request)

pub mod request_log;

pub use request_log::request_log_middleware;
