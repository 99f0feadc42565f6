//! Order type (market, limit, stop).

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the entry price of an order is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Enter immediately; the entry price is the expected fill.
    Market,
    /// Enter when the price reaches the entry price or better.
    Limit,
    /// Enter when the price breaks through the entry price.
    Stop,
}

impl OrderType {
    /// Returns true if the order rests at the broker until triggered.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Limit | Self::Stop)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "MARKET"),
            Self::Limit => write!(f, "LIMIT"),
            Self::Stop => write!(f, "STOP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_type_is_pending() {
        assert!(!OrderType::Market.is_pending());
        assert!(OrderType::Limit.is_pending());
        assert!(OrderType::Stop.is_pending());
    }

    #[test]
    fn order_type_serde() {
        let json = serde_json::to_string(&OrderType::Stop).unwrap();
        assert_eq!(json, "\"STOP\"");
    }
}
