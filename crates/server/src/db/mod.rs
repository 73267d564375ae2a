//! Storage layer for the order backend.
//!
//! # Database
//!
//! Two tables with no relationship between them:
//!
//! - `users` - operator accounts, created via the CLI (no HTTP surface)
//! - `orders` - customer orders, appended by the API and mutated only
//!   through the payment-completion flag
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p guarana-cli -- migrate
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use guarana_core::{OrderId, UserId};

use crate::models::order::{NewOrder, Order};
use crate::models::user::{NewUser, User};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::MemStorage;
pub use postgres::PgStorage;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Persistence operations used by the API and the CLI.
///
/// Lookups report absence as `Ok(None)`; `Err` always means the operation
/// itself failed.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch a user by ID.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by unique username.
    async fn get_user_by_username(&self, username: &str)
    -> Result<Option<User>, RepositoryError>;

    /// Insert a new user, returning the stored row.
    async fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    /// Fetch an order by ID.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Fetch every order, oldest first.
    async fn get_all_orders(&self) -> Result<Vec<Order>, RepositoryError>;

    /// Insert a new order, returning the stored row with its generated ID
    /// and timestamp.
    async fn create_order(&self, new_order: NewOrder) -> Result<Order, RepositoryError>;

    /// Set the payment-completion flag, returning the updated order or
    /// `None` when the ID does not exist.
    async fn update_order_payment(
        &self,
        id: OrderId,
        payment_complete: bool,
    ) -> Result<Option<Order>, RepositoryError>;

    /// Cheap connectivity probe for the readiness endpoint.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
