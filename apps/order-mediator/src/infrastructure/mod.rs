//! Infrastructure Layer
//!
//! Adapters implementing the ports defined in the application layer:
//!
//! - `money_management/`: In-memory volume sizing policies
//!
//! Brokers and market data sources are supplied by the host.

pub mod money_management;
