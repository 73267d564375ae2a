//! Core types for Guarana.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cep;
pub mod cpf;
pub mod email;
pub mod id;
pub mod phone;

pub use cep::{Cep, CepParseError};
pub use cpf::{Cpf, CpfParseError};
pub use email::{Email, EmailError};
pub use id::{OrderId, UserId};
pub use phone::{Phone, PhoneParseError};
