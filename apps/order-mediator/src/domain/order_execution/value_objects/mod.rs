//! Order Execution Value Objects
//!
//! Immutable types for order management.

mod close_conditions;
mod order_side;
mod order_type;

pub use close_conditions::CloseConditions;
pub use order_side::OrderSide;
pub use order_type::OrderType;
