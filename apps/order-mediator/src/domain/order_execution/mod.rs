//! Order Execution Bounded Context
//!
//! Order values exchanged between strategies, the mediation layer and
//! brokers.

mod pending_order;
pub mod value_objects;

pub use pending_order::{OrderIntent, PendingOrder};
pub use value_objects::{CloseConditions, OrderSide, OrderType};
