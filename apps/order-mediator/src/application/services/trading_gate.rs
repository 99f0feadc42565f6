//! Trading Gate
//!
//! A broker decorator that blocks new orders while trading is deactivated.
//! Trading starts deactivated; the host switches it on once it is ready to
//! trade and may switch it off again at any time, e.g. when the account
//! connection becomes unreliable.
//!
//! The flag only governs new submissions. Orders accepted while trading was
//! active keep their handles and events.

use std::cell::Cell;

use crate::application::ports::{Broker, BrokerError, OrderEventListener, OrderManagement};

/// Broker decorator that can programmatically block trading.
#[derive(Debug)]
pub struct TradingGate<B> {
    broker: B,
    active: Cell<bool>,
}

impl<B> TradingGate<B> {
    /// Wrap `broker`. Trading is deactivated until [`TradingGate::activate`]
    /// is called.
    #[must_use]
    pub const fn new(broker: B) -> Self {
        Self {
            broker,
            active: Cell::new(false),
        }
    }

    /// Allow orders to reach the wrapped broker.
    pub fn activate(&self) {
        if !self.active.replace(true) {
            tracing::info!("Trading activated");
        }
    }

    /// Reject all new orders until trading is activated again.
    pub fn deactivate(&self) {
        if self.active.replace(false) {
            tracing::info!("Trading deactivated");
        }
    }

    /// Returns true if orders are currently forwarded.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// The wrapped broker.
    #[must_use]
    pub const fn inner(&self) -> &B {
        &self.broker
    }
}

impl<O, B: Broker<O>> Broker<O> for TradingGate<B> {
    fn send_order(
        &self,
        order: O,
        listener: Box<dyn OrderEventListener>,
    ) -> Result<Box<dyn OrderManagement>, BrokerError> {
        if !self.active.get() {
            tracing::debug!("Rejected order, trading is deactivated");
            return Err(BrokerError::TradingDeactivated);
        }
        self.broker.send_order(order, listener)
    }
}
