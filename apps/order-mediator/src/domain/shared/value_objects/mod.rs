//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod identifiers;
mod price;
mod symbol;
mod timestamp;
mod volume;

pub use identifiers::ReservationId;
pub use price::Price;
pub use symbol::ForexSymbol;
pub use timestamp::Timestamp;
pub use volume::Volume;
