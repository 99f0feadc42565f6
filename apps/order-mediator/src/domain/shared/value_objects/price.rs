//! Price value object for quotes and exchange rates.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Number of pipettes (fractional pips) in one price unit.
const PIPETTES_PER_UNIT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Number of pips in one price unit.
const PIPS_PER_UNIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// A quoted price of a forex symbol.
///
/// Used for entry prices, stop levels, last close prices and exchange
/// rates alike. Distances between prices are also expressed as `Price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Price from a Decimal.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a Price from a whole number of pipettes (1 pipette = 0.00001).
    #[must_use]
    pub fn from_pipettes(pipettes: i64) -> Self {
        Self(Decimal::new(pipettes, 5))
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// The price in pipettes, truncated and saturated to the `i64` range.
    #[must_use]
    pub fn as_pipettes(&self) -> i64 {
        let pipettes = (self.0 * PIPETTES_PER_UNIT).trunc();
        pipettes.to_i64().unwrap_or(if pipettes.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    /// The price expressed in pips (1 pip = 0.0001).
    #[must_use]
    pub fn as_pips(&self) -> Decimal {
        self.0 * PIPS_PER_UNIT
    }

    /// Absolute distance between two prices.
    #[must_use]
    pub fn abs_diff(&self, other: &Self) -> Self {
        Self((self.0 - other.0).abs())
    }

    /// Returns true if this price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}
