//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//!
//! # Bounded Contexts
//!
//! - [`order_execution`]: Order intents, enriched pending orders, close conditions
//! - [`market_data`]: Bars delivered by market data feeds
//! - [`shared`]: Prices, volumes, symbols and timestamps

pub mod market_data;
pub mod order_execution;
pub mod shared;
