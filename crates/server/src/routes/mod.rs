//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                - Liveness check
//! GET   /health/ready          - Readiness check (storage connectivity)
//!
//! # Orders
//! POST  /api/orders            - Create an order
//! GET   /api/orders            - List all orders, oldest first
//! GET   /api/orders/{id}       - Fetch a single order
//! PATCH /api/orders/payment    - Update an order's payment status
//!
//! # Postal codes
//! GET   /api/cep/{cep}         - Look up the address for a CEP
//! ```

pub mod cep;
pub mod orders;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Router, middleware};

use crate::middleware::request_log_middleware;
use crate::state::AppState;

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::list))
        .route("/payment", patch(orders::update_payment))
        .route("/{id}", get(orders::show))
}

/// Create the API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cep/{cep}", get(cep::lookup))
        .nest("/orders", order_routes())
}

/// Create the application router.
///
/// Sentry layers are added around this router in `main`, so tests can
/// drive it without a Sentry client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_routes())
        .layer(middleware::from_fn(request_log_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies storage connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.storage().ping().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
