//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use order_mediator::{
    Broker, BrokerError, CloseConditions, ForexSymbol, OrderEventListener, OrderIntent,
    OrderManagement, OrderSide, OrderType, PendingOrder, Price, Timestamp,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One order accepted by the [`SimulatedBroker`].
pub struct SimulatedOrder {
    pub order: PendingOrder,
    listener: Box<dyn OrderEventListener>,
    conditions: RefCell<CloseConditions>,
    opened: Cell<bool>,
    closed: Cell<bool>,
}

impl SimulatedOrder {
    pub fn is_open(&self) -> bool {
        self.opened.get() && !self.closed.get()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    pub fn conditions(&self) -> CloseConditions {
        *self.conditions.borrow()
    }
}

/// Broker that accepts pending orders and lets the test drive fills.
#[derive(Default)]
pub struct SimulatedBroker {
    orders: RefCell<Vec<Rc<SimulatedOrder>>>,
    reject_with: RefCell<Option<BrokerError>>,
}

impl SimulatedBroker {
    pub fn reject_next(&self, error: BrokerError) {
        *self.reject_with.borrow_mut() = Some(error);
    }

    pub fn order(&self, index: usize) -> Rc<SimulatedOrder> {
        Rc::clone(&self.orders.borrow()[index])
    }

    pub fn order_count(&self) -> usize {
        self.orders.borrow().len()
    }

    /// Fill the pending order at its entry price.
    pub fn fill(&self, index: usize, time: Timestamp) {
        let order = self.order(index);
        assert!(!order.opened.get(), "order {index} already filled");
        order.opened.set(true);
        order.listener.on_order_opened(time, order.order.entry_price());
    }

    /// Close the open order at its stop-loss.
    pub fn hit_stop_loss(&self, index: usize, time: Timestamp) {
        let order = self.order(index);
        assert!(order.is_open(), "order {index} is not open");
        order.closed.set(true);
        let stop_loss = order.conditions().stop_loss();
        order.listener.on_order_closed(time, stop_loss);
    }
}

impl Broker<PendingOrder> for SimulatedBroker {
    fn send_order(
        &self,
        order: PendingOrder,
        listener: Box<dyn OrderEventListener>,
    ) -> Result<Box<dyn OrderManagement>, BrokerError> {
        if let Some(error) = self.reject_with.borrow_mut().take() {
            return Err(error);
        }
        let accepted = Rc::new(SimulatedOrder {
            conditions: RefCell::new(*order.close_conditions()),
            order,
            listener,
            opened: Cell::new(false),
            closed: Cell::new(false),
        });
        self.orders.borrow_mut().push(Rc::clone(&accepted));
        Ok(Box::new(SimulatedHandle {
            order: Rc::downgrade(&accepted),
        }))
    }
}

/// Handle for a [`SimulatedOrder`].
///
/// Closing an open position reports the close to the listener before
/// returning, the way live brokers confirm market closes.
struct SimulatedHandle {
    order: Weak<SimulatedOrder>,
}

impl OrderManagement for SimulatedHandle {
    fn close_or_cancel(&self) {
        let Some(order) = self.order.upgrade() else {
            return;
        };
        if order.closed.replace(true) {
            return;
        }
        if order.opened.get() {
            let price = order.order.entry_price();
            order.listener.on_order_closed(Timestamp::now(), price);
        }
    }

    fn change_close_conditions(&self, conditions: CloseConditions) -> Result<(), BrokerError> {
        let order = self.order.upgrade().ok_or_else(|| BrokerError::OrderNotFound {
            order_id: "simulated".to_string(),
        })?;
        *order.conditions.borrow_mut() = conditions;
        Ok(())
    }
}

/// Strategy-side listener recording every event.
#[derive(Default)]
pub struct RecordingListener {
    events: RefCell<Vec<(&'static str, Price)>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<(&'static str, Price)> {
        self.events.borrow().clone()
    }
}

impl OrderEventListener for RecordingListener {
    fn on_order_opened(&self, _time: Timestamp, price: Price) {
        self.events.borrow_mut().push(("opened", price));
    }

    fn on_order_closed(&self, _time: Timestamp, price: Price) {
        self.events.borrow_mut().push(("closed", price));
    }
}

pub fn eurusd() -> ForexSymbol {
    ForexSymbol::parse("EURUSD").unwrap()
}

pub fn price(value: Decimal) -> Price {
    Price::new(value)
}

pub fn time(rfc3339: &str) -> Timestamp {
    Timestamp::parse(rfc3339).unwrap()
}

/// Buy limit at 1.1000 with a 50 pip stop and a 100 pip target.
pub fn buy_limit_intent() -> OrderIntent {
    OrderIntent::new(
        eurusd(),
        OrderSide::Buy,
        OrderType::Limit,
        price(dec!(1.1000)),
        CloseConditions::new(price(dec!(1.1100)), price(dec!(1.0950))),
    )
}
