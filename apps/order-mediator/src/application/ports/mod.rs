//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driver Ports** (Primary/Inbound): How the world uses our application
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod broker_port;
mod market_data_port;
mod money_management_port;

pub use broker_port::{Broker, BrokerError, OrderEventListener, OrderManagement};
pub use market_data_port::MarketDataListener;
pub use money_management_port::{MoneyManagement, VolumeRequest, VolumeReservation};
