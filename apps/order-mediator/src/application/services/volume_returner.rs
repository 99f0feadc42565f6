//! Volume Returner
//!
//! Interceptor installed between an inner broker and the strategy for every
//! order that was sized by the money management. It forwards all lifecycle
//! events and management calls unchanged and returns the reserved volume
//! when the order ends.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──bind_order_management──► Active ──on_order_closed──► Released
//!    │                                  └────close_or_cancel────►    ▲
//!    └───────────────release (rollback)──────────────────────────────┘
//! ```
//!
//! The reservation sits in an `Option` and is taken out on the first release,
//! so whichever terminal event arrives first returns the volume and every
//! later trigger is a no-op.
//!
//! # Release ordering
//!
//! `on_order_closed` releases *before* forwarding, so a strategy reacting to
//! the close can immediately request the freed volume again.
//! `close_or_cancel` releases *after* forwarding, so the volume is only freed
//! once the inner broker has processed the cancel. If the inner broker
//! reports the close synchronously from within `close_or_cancel`, the close
//! event performs the release and the trailing release is skipped.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::application::ports::{
    BrokerError, OrderEventListener, OrderManagement, VolumeReservation,
};
use crate::domain::order_execution::CloseConditions;
use crate::domain::shared::{Price, ReservationId, Timestamp, Volume};

/// Where a [`VolumeReturner`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnerState {
    /// Volume reserved, the inner broker has not yet accepted the order.
    Pending,
    /// The inner broker accepted the order; its handle is bound.
    Active,
    /// The reserved volume was returned to the money management.
    Released,
}

impl fmt::Display for ReturnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Released => write!(f, "RELEASED"),
        }
    }
}

/// What caused a reservation to be released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReleaseTrigger {
    /// The inner broker refused the order.
    Rollback,
    /// The inner broker reported the order as closed.
    OrderClosed,
    /// The strategy closed or cancelled the order.
    CloseOrCancel,
    /// Every reference to the returner was dropped.
    Abandoned,
}

impl ReleaseTrigger {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Rollback => "rollback",
            Self::OrderClosed => "order_closed",
            Self::CloseOrCancel => "close_or_cancel",
            Self::Abandoned => "abandoned",
        }
    }
}

struct ReturnerInner {
    id: ReservationId,
    volume: Volume,
    reservation: RefCell<Option<Box<dyn VolumeReservation>>>,
    listener: Box<dyn OrderEventListener>,
    order_management: RefCell<Option<Box<dyn OrderManagement>>>,
}

impl ReturnerInner {
    fn release(&self, trigger: ReleaseTrigger) -> bool {
        let reservation = self.reservation.borrow_mut().take();
        match reservation {
            Some(reservation) => {
                reservation.release();
                tracing::info!(
                    reservation_id = %self.id,
                    volume = %self.volume,
                    trigger = trigger.as_str(),
                    "Returned reserved volume to money management"
                );
                true
            }
            None => {
                tracing::debug!(
                    reservation_id = %self.id,
                    trigger = trigger.as_str(),
                    "Reserved volume already returned, ignoring"
                );
                false
            }
        }
    }
}

impl Drop for ReturnerInner {
    fn drop(&mut self) {
        if let Some(reservation) = self.reservation.get_mut().take() {
            tracing::warn!(
                reservation_id = %self.id,
                volume = %self.volume,
                trigger = ReleaseTrigger::Abandoned.as_str(),
                "Order handle and listener dropped while volume was reserved, returning it"
            );
            reservation.release();
        }
    }
}

/// Returns reserved volume to the money management when its order ends.
///
/// Acts as the [`OrderEventListener`] handed to the inner broker and as the
/// [`OrderManagement`] handle handed back to the strategy. Both roles are
/// clones sharing one state.
#[derive(Clone)]
pub struct VolumeReturner {
    inner: Rc<ReturnerInner>,
}

impl VolumeReturner {
    /// Take ownership of `reservation` on behalf of an order whose events
    /// should reach `listener`.
    #[must_use]
    pub fn new(
        reservation: Box<dyn VolumeReservation>,
        listener: Box<dyn OrderEventListener>,
    ) -> Self {
        let volume = reservation.volume();
        Self {
            inner: Rc::new(ReturnerInner {
                id: ReservationId::generate(),
                volume,
                reservation: RefCell::new(Some(reservation)),
                listener,
                order_management: RefCell::new(None),
            }),
        }
    }

    /// Identifier used in log output for this reservation.
    #[must_use]
    pub fn id(&self) -> &ReservationId {
        &self.inner.id
    }

    /// The volume that was reserved.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.inner.volume
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ReturnerState {
        if self.inner.reservation.borrow().is_none() {
            ReturnerState::Released
        } else if self.inner.order_management.borrow().is_none() {
            ReturnerState::Pending
        } else {
            ReturnerState::Active
        }
    }

    /// Bind the handle the inner broker returned for the order.
    pub(crate) fn bind_order_management(&self, order_management: Box<dyn OrderManagement>) {
        *self.inner.order_management.borrow_mut() = Some(order_management);
    }

    /// Return the reserved volume if it was not returned yet.
    ///
    /// Returns true if this call performed the release.
    pub(crate) fn release(&self, trigger: ReleaseTrigger) -> bool {
        self.inner.release(trigger)
    }
}

impl fmt::Debug for VolumeReturner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeReturner")
            .field("id", &self.inner.id)
            .field("volume", &self.inner.volume)
            .field("state", &self.state())
            .finish()
    }
}

impl OrderEventListener for VolumeReturner {
    fn on_order_opened(&self, time: Timestamp, price: Price) {
        self.inner.listener.on_order_opened(time, price);
    }

    fn on_order_closed(&self, time: Timestamp, price: Price) {
        self.release(ReleaseTrigger::OrderClosed);
        self.inner.listener.on_order_closed(time, price);
    }
}

impl OrderManagement for VolumeReturner {
    fn close_or_cancel(&self) {
        {
            // Held across the call: binding happens once, before the handle is
            // returned, so a re-entrant call can only re-borrow shared.
            let order_management = self.inner.order_management.borrow();
            match order_management.as_ref() {
                Some(order_management) => order_management.close_or_cancel(),
                None => tracing::warn!(
                    reservation_id = %self.inner.id,
                    "close_or_cancel called before the broker accepted the order"
                ),
            }
        }
        self.release(ReleaseTrigger::CloseOrCancel);
    }

    fn change_close_conditions(&self, conditions: CloseConditions) -> Result<(), BrokerError> {
        let order_management = self.inner.order_management.borrow();
        order_management.as_ref().map_or_else(
            || {
                Err(BrokerError::OrderNotFound {
                    order_id: self.inner.id.to_string(),
                })
            },
            |order_management| order_management.change_close_conditions(conditions),
        )
    }
}
