//! Domain models for the order backend.

pub mod order;
pub mod user;
