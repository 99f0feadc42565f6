//! Strategy order intents and their volume-enriched counterparts.

use serde::{Deserialize, Serialize};

use super::value_objects::{CloseConditions, OrderSide, OrderType};
use crate::domain::shared::{ForexSymbol, Price, Volume};

/// An order as a strategy expresses it: everything but the volume.
///
/// The volume is decided later by the money management, which turns the
/// intent into a [`PendingOrder`] through [`OrderIntent::with_volume`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntent {
    symbol: ForexSymbol,
    side: OrderSide,
    order_type: OrderType,
    entry_price: Price,
    close_conditions: CloseConditions,
}

impl OrderIntent {
    /// Create a new order intent.
    #[must_use]
    pub const fn new(
        symbol: ForexSymbol,
        side: OrderSide,
        order_type: OrderType,
        entry_price: Price,
        close_conditions: CloseConditions,
    ) -> Self {
        Self {
            symbol,
            side,
            order_type,
            entry_price,
            close_conditions,
        }
    }

    /// The traded symbol.
    #[must_use]
    pub const fn symbol(&self) -> &ForexSymbol {
        &self.symbol
    }

    /// Buy or sell.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.side
    }

    /// How the entry price is interpreted.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// The price the order should be opened at.
    #[must_use]
    pub const fn entry_price(&self) -> Price {
        self.entry_price
    }

    /// Take-profit, stop-loss and expiration.
    #[must_use]
    pub const fn close_conditions(&self) -> &CloseConditions {
        &self.close_conditions
    }

    /// Distance between the entry price and the stop-loss.
    ///
    /// This is the amount of price movement the trade risks and the main
    /// input for volume sizing.
    #[must_use]
    pub fn stop_distance(&self) -> Price {
        self.entry_price.abs_diff(&self.close_conditions.stop_loss())
    }

    /// Attach a concrete volume, producing an order ready for execution.
    #[must_use]
    pub fn with_volume(self, volume: Volume) -> PendingOrder {
        PendingOrder {
            intent: self,
            volume,
        }
    }
}

/// An [`OrderIntent`] enriched with the volume to trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOrder {
    #[serde(flatten)]
    intent: OrderIntent,
    volume: Volume,
}

impl PendingOrder {
    /// The volume to trade.
    #[must_use]
    pub const fn volume(&self) -> Volume {
        self.volume
    }

    /// The traded symbol.
    #[must_use]
    pub const fn symbol(&self) -> &ForexSymbol {
        self.intent.symbol()
    }

    /// Buy or sell.
    #[must_use]
    pub const fn side(&self) -> OrderSide {
        self.intent.side()
    }

    /// How the entry price is interpreted.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.intent.order_type()
    }

    /// The price the order should be opened at.
    #[must_use]
    pub const fn entry_price(&self) -> Price {
        self.intent.entry_price()
    }

    /// Take-profit, stop-loss and expiration.
    #[must_use]
    pub const fn close_conditions(&self) -> &CloseConditions {
        self.intent.close_conditions()
    }

    /// The intent this order was built from.
    #[must_use]
    pub const fn intent(&self) -> &OrderIntent {
        &self.intent
    }
}
