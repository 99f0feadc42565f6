//! Application Services
//!
//! Broker decorators that sit between a strategy and the broker executing
//! its orders.
//!
//! ```text
//! strategy ──► VolumeManagedBroker ──► TradingGate ──► broker
//!     ▲                                                  │
//!     └──────────────── VolumeReturner ◄─────────────────┘
//! ```

mod trading_gate;
mod volume_managed_broker;
mod volume_returner;

pub use trading_gate::TradingGate;
pub use volume_managed_broker::VolumeManagedBroker;
pub use volume_returner::{ReturnerState, VolumeReturner};
