//! CLI command implementations.

pub mod migrate;
pub mod user;

use secrecy::SecretString;

/// Read the database connection string, falling back to the generic
/// `DATABASE_URL` (set by managed Postgres attachments).
pub(crate) fn database_url() -> Option<SecretString> {
    std::env::var("GUARANA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
