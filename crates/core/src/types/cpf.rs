//! CPF (Cadastro de Pessoas Físicas) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cpf`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CpfParseError {
    /// The input is not exactly 11 characters long.
    #[error("CPF must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input contains a character that is not an ASCII digit.
    #[error("CPF may contain only ASCII digits")]
    NonDigit,
}

/// A Brazilian natural-person registry number (CPF).
///
/// Stored unformatted: exactly 11 ASCII digits, no dots or dashes.
/// This is format validation only; the check digits are not verified.
///
/// ## Examples
///
/// ```
/// use guarana_core::Cpf;
///
/// assert!(Cpf::parse("52998224725").is_ok());
/// assert!(Cpf::parse("529.982.247-25").is_err()); // formatted
/// assert!(Cpf::parse("5299822472").is_err());     // 10 digits
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Number of digits in an unformatted CPF.
    pub const LENGTH: usize = 11;

    /// Parse a `Cpf` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not exactly 11 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, CpfParseError> {
        if s.len() != Self::LENGTH {
            return Err(CpfParseError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CpfParseError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the CPF as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Cpf` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Cpf {
    type Err = CpfParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Cpf {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Cpf {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Cpf {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
