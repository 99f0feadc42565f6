//! Conditions under which an open order is closed.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Price, Timestamp};

/// Take-profit, stop-loss and optional expiration of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseConditions {
    take_profit: Price,
    stop_loss: Price,
    expiration: Option<Timestamp>,
}

impl CloseConditions {
    /// Create close conditions without an expiration.
    #[must_use]
    pub const fn new(take_profit: Price, stop_loss: Price) -> Self {
        Self {
            take_profit,
            stop_loss,
            expiration: None,
        }
    }

    /// The price at which the order is closed in profit.
    #[must_use]
    pub const fn take_profit(&self) -> Price {
        self.take_profit
    }

    /// The price at which the order is closed in loss.
    #[must_use]
    pub const fn stop_loss(&self) -> Price {
        self.stop_loss
    }

    /// Time after which a still-pending order is cancelled.
    #[must_use]
    pub const fn expiration(&self) -> Option<Timestamp> {
        self.expiration
    }

    /// Copy with a different take-profit.
    #[must_use]
    pub const fn with_take_profit(mut self, take_profit: Price) -> Self {
        self.take_profit = take_profit;
        self
    }

    /// Copy with a different stop-loss.
    #[must_use]
    pub const fn with_stop_loss(mut self, stop_loss: Price) -> Self {
        self.stop_loss = stop_loss;
        self
    }

    /// Copy with an expiration.
    #[must_use]
    pub const fn with_expiration(mut self, expiration: Timestamp) -> Self {
        self.expiration = Some(expiration);
        self
    }
}
