// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Mediator - Rust Core Library
//!
//! Broker decorators that sit between a trading strategy and a broker.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Value objects with no external dependencies
//!   - `shared`: Price, Volume, `ForexSymbol`, Timestamp
//!   - `order_execution`: Order intents, pending orders, close conditions
//!   - `market_data`: Candles
//!
//! - **Application**: Ports and decorators
//!   - `ports`: `Broker`, `OrderEventListener`, `OrderManagement`,
//!     `MoneyManagement`, `MarketDataListener`
//!   - `services`: `TradingGate`, `VolumeManagedBroker`, `VolumeReturner`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `money_management`: Fixed-risk volume sizing
//!
//! # Threading
//!
//! Decorators keep their state in `Cell`s and are not `Send`. The host
//! drives each chain from a single thread; callbacks into a decorator from
//! inside one of its own calls are allowed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Value objects with no external dependencies.
pub mod domain;

/// Application layer - Ports and broker decorators.
pub mod application;

/// Infrastructure layer - Adapters for the application ports.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

/// Logging setup.
pub mod observability;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::market_data::Candle;
pub use domain::order_execution::{CloseConditions, OrderIntent, OrderSide, OrderType, PendingOrder};
pub use domain::shared::{DomainError, ForexSymbol, Price, ReservationId, Timestamp, Volume};

// Application re-exports
pub use application::ports::{
    Broker, BrokerError, MarketDataListener, MoneyManagement, OrderEventListener,
    OrderManagement, VolumeRequest, VolumeReservation,
};
pub use application::services::{ReturnerState, TradingGate, VolumeManagedBroker, VolumeReturner};

// Infrastructure re-exports
pub use infrastructure::money_management::FixedRiskMoneyManagement;

pub use config::{ConfigError, MediatorConfig, load_config, load_config_from_string};
pub use observability::{ObservabilityError, init_logging};
