//! Integration tests for the Guarana order backend.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply database migrations
//! cargo run -p guarana-cli -- migrate
//!
//! # Start the server
//! cargo run -p guarana-server
//!
//! # Run integration tests against it
//! cargo test -p guarana-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `orders_api` - Order creation, retrieval and payment updates
//! - `cep_api` - Postal code lookups
//!
//! All tests are `#[ignore]`d by default because they need a running
//! server and database. The target server is configured through the
//! `GUARANA_BASE_URL` environment variable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL of the server under test.
///
/// Reads `GUARANA_BASE_URL`, falling back to the default local port.
#[must_use]
pub fn base_url() -> String {
    std::env::var("GUARANA_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// HTTP client used by the integration tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}
