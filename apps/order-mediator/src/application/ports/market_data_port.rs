//! Market Data Port (Driver Port)
//!
//! Push interface through which market data feeds deliver bars.

use crate::domain::market_data::Candle;

/// Receives market data of one symbol as it arrives.
pub trait MarketDataListener {
    /// A new bar is available.
    fn on_market_data(&self, candle: &Candle);
}
