//! Broker Port (Driven Port)
//!
//! Interface for sending orders to a broker and following their lifecycle.
//!
//! Brokers decorate each other: a broker receives an order together with an
//! [`OrderEventListener`] and hands back an [`OrderManagement`] handle. A
//! decorating broker may substitute both with its own interceptors.

use std::rc::Rc;

use crate::domain::order_execution::CloseConditions;
use crate::domain::shared::{Price, Timestamp};

/// Broker port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrokerError {
    /// Trading is switched off at a gate.
    #[error("Trading is programmatically deactivated at the moment")]
    TradingDeactivated,

    /// The money management refused to provide volume for the order.
    #[error(
        "Could not place the pending order at the broker because the money management did not provide volume"
    )]
    VolumeDenied,

    /// Order rejected by broker.
    #[error("Order rejected: {reason}")]
    OrderRejected {
        /// Rejection reason.
        reason: String,
    },

    /// Connection error.
    #[error("Broker connection error: {message}")]
    ConnectionError {
        /// Error details.
        message: String,
    },

    /// Order not found.
    #[error("Order not found: {order_id}")]
    OrderNotFound {
        /// The missing order ID.
        order_id: String,
    },

    /// Unknown error.
    #[error("Broker error: {message}")]
    Unknown {
        /// Error details.
        message: String,
    },
}

/// Receives lifecycle events of a single order.
///
/// Events arrive in the order opened → closed. Pending orders that are
/// cancelled before opening may never see either event.
pub trait OrderEventListener {
    /// The order was filled and is now an open position.
    fn on_order_opened(&self, time: Timestamp, price: Price);

    /// The position was closed.
    fn on_order_closed(&self, time: Timestamp, price: Price);
}

/// Handle for managing an order that was accepted by a broker.
pub trait OrderManagement {
    /// Close the position if the order is open, cancel it if still pending.
    fn close_or_cancel(&self);

    /// Replace the close conditions of the order.
    fn change_close_conditions(&self, conditions: CloseConditions) -> Result<(), BrokerError>;
}

/// Port for placing orders of type `O`.
pub trait Broker<O> {
    /// Place an order.
    ///
    /// On success the broker owns `listener` and reports the order's
    /// lifecycle through it. On failure no events will ever be delivered.
    fn send_order(
        &self,
        order: O,
        listener: Box<dyn OrderEventListener>,
    ) -> Result<Box<dyn OrderManagement>, BrokerError>;
}

impl<O, B: Broker<O> + ?Sized> Broker<O> for &B {
    fn send_order(
        &self,
        order: O,
        listener: Box<dyn OrderEventListener>,
    ) -> Result<Box<dyn OrderManagement>, BrokerError> {
        (**self).send_order(order, listener)
    }
}

impl<O, B: Broker<O> + ?Sized> Broker<O> for Rc<B> {
    fn send_order(
        &self,
        order: O,
        listener: Box<dyn OrderEventListener>,
    ) -> Result<Box<dyn OrderManagement>, BrokerError> {
        (**self).send_order(order, listener)
    }
}

impl<O, B: Broker<O> + ?Sized> Broker<O> for Box<B> {
    fn send_order(
        &self,
        order: O,
        listener: Box<dyn OrderEventListener>,
    ) -> Result<Box<dyn OrderManagement>, BrokerError> {
        (**self).send_order(order, listener)
    }
}

impl<L: OrderEventListener + ?Sized> OrderEventListener for Rc<L> {
    fn on_order_opened(&self, time: Timestamp, price: Price) {
        (**self).on_order_opened(time, price);
    }

    fn on_order_closed(&self, time: Timestamp, price: Price) {
        (**self).on_order_closed(time, price);
    }
}
