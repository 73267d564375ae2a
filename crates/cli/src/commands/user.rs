//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! guarana-cli user create -u admin -p secret
//! ```
//!
//! # Environment Variables
//!
//! - `GUARANA_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to the generic `DATABASE_URL`)

use thiserror::Error;

use guarana_server::db::{self, PgStorage, RepositoryError, Storage};
use guarana_server::models::user::NewUser;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Storage error (duplicate username surfaces here as a conflict).
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Create a new user.
///
/// The password is stored exactly as supplied; there is no login surface
/// in the HTTP API, so these accounts exist for operational tooling only.
///
/// # Arguments
///
/// * `username` - Unique username
/// * `password` - Password, stored as opaque text
///
/// # Returns
///
/// The ID of the created user.
pub async fn create(username: &str, password: &str) -> Result<i32, UserError> {
    dotenvy::dotenv().ok();

    let database_url =
        super::database_url().ok_or(UserError::MissingEnvVar("GUARANA_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Creating user: {}", username);

    let storage = PgStorage::new(pool);
    let user = storage
        .create_user(NewUser {
            username: username.to_owned(),
            password: password.to_owned(),
        })
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );

    Ok(user.id.as_i32())
}
