//! Candle (OHLC bar) value object.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Price, Timestamp};

/// One OHLC bar of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Start time of the bar.
    pub time: Timestamp,
    /// First price of the bar.
    pub open: Price,
    /// Highest price of the bar.
    pub high: Price,
    /// Lowest price of the bar.
    pub low: Price,
    /// Last price of the bar.
    pub close: Price,
}

impl Candle {
    /// Create a new candle.
    #[must_use]
    pub const fn new(time: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// A bar where every price equals `price`.
    #[must_use]
    pub const fn flat(time: Timestamp, price: Price) -> Self {
        Self::new(time, price, price, price, price)
    }

    /// High minus low.
    #[must_use]
    pub fn range(&self) -> Price {
        self.high - self.low
    }
}
