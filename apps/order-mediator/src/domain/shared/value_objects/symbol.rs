//! Forex symbol value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::shared::DomainError;

/// A forex currency pair such as `EURUSD`.
///
/// The first three letters are the base currency, the last three the quote
/// currency. Symbols are normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ForexSymbol(String);

impl ForexSymbol {
    /// Parse a forex symbol.
    ///
    /// # Errors
    ///
    /// Returns error if the symbol is not exactly six ASCII letters.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().to_uppercase();
        if value.len() != 6 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::invalid_value(
                "symbol",
                format!("'{value}' is not a six letter currency pair"),
            ));
        }
        Ok(Self(value))
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base currency (first three letters).
    #[must_use]
    pub fn base_currency(&self) -> &str {
        &self.0[..3]
    }

    /// The quote currency (last three letters).
    #[must_use]
    pub fn quote_currency(&self) -> &str {
        &self.0[3..]
    }

    /// Returns true if either side of this pair is `currency`.
    #[must_use]
    pub fn involves(&self, currency: &str) -> bool {
        self.base_currency().eq_ignore_ascii_case(currency)
            || self.quote_currency().eq_ignore_ascii_case(currency)
    }
}

impl fmt::Display for ForexSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ForexSymbol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ForexSymbol {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ForexSymbol> for String {
    fn from(value: ForexSymbol) -> Self {
        value.0
    }
}
