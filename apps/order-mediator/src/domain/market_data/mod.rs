//! Market Data Bounded Context
//!
//! Bars delivered by market data feeds.

mod candle;

pub use candle::Candle;
