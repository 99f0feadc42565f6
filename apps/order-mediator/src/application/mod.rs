//! Application Layer
//!
//! The application layer orchestrates domain logic.
//! It defines:
//!
//! - **Ports**: Interfaces for interacting with external systems
//! - **Services**: Broker decorators mediating between strategy and broker

pub mod ports;
pub mod services;

pub use ports::*;
pub use services::*;
