//! Guarana Core - Shared domain types.
//!
//! This crate provides common types used across all Guarana components:
//! - `server` - Order-taking JSON backend (orders + CEP address lookup)
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and validated Brazilian
//!   checkout fields (CPF, CEP, email, phone)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
