//! Clients for external services.

pub mod cep;
