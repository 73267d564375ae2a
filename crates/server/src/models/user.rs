//! User domain types.
//!
//! Users are operator accounts with no HTTP surface; they are created
//! through the CLI and looked up by other tooling.

use chrono::{DateTime, Utc};

use guarana_core::UserId;

/// An operator account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Password, stored exactly as supplied (opaque text).
    pub password: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}
