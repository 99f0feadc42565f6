//! Volume value object for tradable order sizes.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::domain::shared::DomainError;

/// A tradable volume measured in lots.
///
/// One lot is 100,000 units of the base currency. Fractional lots
/// (mini = 0.1, micro = 0.01) are allowed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Volume(Decimal);

impl Volume {
    /// Zero volume.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Base currency units in one standard lot.
    pub const UNITS_PER_LOT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

    /// Create a Volume from a number of lots.
    #[must_use]
    pub const fn from_lots(lots: Decimal) -> Self {
        Self(lots)
    }

    /// Create a Volume from base currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units) / Self::UNITS_PER_LOT)
    }

    /// The volume in lots.
    #[must_use]
    pub const fn lots(&self) -> Decimal {
        self.0
    }

    /// The volume in base currency units, truncated.
    #[must_use]
    pub fn as_units(&self) -> i64 {
        (self.0 * Self::UNITS_PER_LOT).trunc().to_i64().unwrap_or(i64::MAX)
    }

    /// Returns true if this volume is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns true if this volume is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Round down to a multiple of `step`.
    ///
    /// A non-positive step leaves the volume unchanged; use
    /// [`Volume::validate_step_size`] before trusting a step.
    #[must_use]
    pub fn round_down_to_step(&self, step: Self) -> Self {
        if !step.is_positive() {
            return *self;
        }
        Self((self.0 / step.0).floor() * step.0)
    }

    /// Validate this volume as an allowed step size.
    ///
    /// # Errors
    ///
    /// Returns error if the step is zero or negative.
    pub fn validate_step_size(&self) -> Result<(), DomainError> {
        if self.is_positive() {
            Ok(())
        } else {
            Err(DomainError::invalid_value(
                "volume_step_size",
                format!("Volume step size must be positive, got {self}"),
            ))
        }
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lots", self.0.normalize())
    }
}

impl Add for Volume {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Volume {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
