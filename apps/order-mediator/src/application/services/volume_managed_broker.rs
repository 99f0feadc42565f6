//! Volume Managed Broker
//!
//! Turns the volume-less [`OrderIntent`]s of a strategy into [`PendingOrder`]s
//! by asking a money management policy how much to trade, and makes sure the
//! granted volume is handed back when the order ends.
//!
//! # Submission flow
//!
//! ```text
//! send_order(intent)
//!     │
//!     ├── last price / exchange rate ──► panic if never observed
//!     ├── MoneyManagement::request_volume ──► None ──► BrokerError::VolumeDenied
//!     │
//!     ├── VolumeReturner(reservation, listener)
//!     ├── inner.send_order(intent + volume, returner)
//!     │         ├── Err ──► release (rollback), propagate error
//!     │         └── Ok(handle) ──► bind handle, return returner as handle
//! ```

use std::cell::Cell;

use super::volume_returner::{ReleaseTrigger, VolumeReturner};
use crate::application::ports::{
    Broker, BrokerError, MarketDataListener, MoneyManagement, OrderEventListener,
    OrderManagement, VolumeRequest,
};
use crate::domain::market_data::Candle;
use crate::domain::order_execution::{OrderIntent, PendingOrder};
use crate::domain::shared::{DomainError, ForexSymbol, Price, Volume};

/// Broker decorator that sizes orders through a money management policy.
///
/// Prices must be fed through [`VolumeManagedBroker::on_price_update`] (or
/// [`MarketDataListener::on_market_data`]) and
/// [`VolumeManagedBroker::on_exchange_rate_update`] before the first order is
/// sent.
#[derive(Debug)]
pub struct VolumeManagedBroker<B, M> {
    broker: B,
    money_management: M,
    symbol: ForexSymbol,
    account_currency_exchange_symbol: ForexSymbol,
    allowed_step_size: Volume,
    last_price: Cell<Option<Price>>,
    last_exchange_rate: Cell<Option<Price>>,
}

impl<B, M> VolumeManagedBroker<B, M> {
    /// Create a new broker decorator.
    ///
    /// * `broker` - receives the sized orders
    /// * `money_management` - grants volume for each order
    /// * `symbol` - the traded symbol
    /// * `account_currency_exchange_symbol` - converts the account currency to
    ///   the quote currency of `symbol`
    /// * `allowed_step_size` - granted volumes must be multiples of this
    ///
    /// # Errors
    ///
    /// Returns error if `allowed_step_size` is not positive.
    pub fn new(
        broker: B,
        money_management: M,
        symbol: ForexSymbol,
        account_currency_exchange_symbol: ForexSymbol,
        allowed_step_size: Volume,
    ) -> Result<Self, DomainError> {
        allowed_step_size.validate_step_size()?;
        Ok(Self {
            broker,
            money_management,
            symbol,
            account_currency_exchange_symbol,
            allowed_step_size,
            last_price: Cell::new(None),
            last_exchange_rate: Cell::new(None),
        })
    }

    /// Record the latest close price of the traded symbol.
    pub fn on_price_update(&self, price: Price) {
        self.last_price.set(Some(price));
    }

    /// Record the latest price of the account currency exchange symbol.
    pub fn on_exchange_rate_update(&self, price: Price) {
        self.last_exchange_rate.set(Some(price));
    }

    /// Latest observed close price of the traded symbol.
    #[must_use]
    pub fn last_price(&self) -> Option<Price> {
        self.last_price.get()
    }

    /// Latest observed account currency exchange rate.
    #[must_use]
    pub fn last_exchange_rate(&self) -> Option<Price> {
        self.last_exchange_rate.get()
    }

    /// The traded symbol.
    #[must_use]
    pub const fn symbol(&self) -> &ForexSymbol {
        &self.symbol
    }

    /// The symbol converting account currency to the traded quote currency.
    #[must_use]
    pub const fn account_currency_exchange_symbol(&self) -> &ForexSymbol {
        &self.account_currency_exchange_symbol
    }

    /// Granted volumes are multiples of this step.
    #[must_use]
    pub const fn allowed_step_size(&self) -> Volume {
        self.allowed_step_size
    }

    /// The wrapped broker.
    #[must_use]
    pub const fn inner(&self) -> &B {
        &self.broker
    }

    /// Build the sizing request for `intent` from the cached prices.
    ///
    /// # Panics
    ///
    /// Panics if no price or no exchange rate was observed yet. Sending an
    /// order before market data arrived is a wiring defect of the host.
    fn volume_request(&self, intent: &OrderIntent) -> VolumeRequest {
        let Some(price) = self.last_price.get() else {
            panic!(
                "An order was sent before the current price of the traded symbol {} was passed to this broker",
                self.symbol
            );
        };
        let Some(exchange_rate) = self.last_exchange_rate.get() else {
            panic!(
                "An order was sent before the current price of {}, exchanging the account currency to the quote currency of {}, was passed to this broker",
                self.account_currency_exchange_symbol, self.symbol
            );
        };

        VolumeRequest {
            symbol: self.symbol.clone(),
            price,
            account_currency_exchange_symbol: self.account_currency_exchange_symbol.clone(),
            account_currency_exchange_rate: exchange_rate,
            stop_distance: intent.stop_distance(),
            allowed_step_size: self.allowed_step_size,
        }
    }
}

impl<B, M> Broker<OrderIntent> for VolumeManagedBroker<B, M>
where
    B: Broker<PendingOrder>,
    M: MoneyManagement,
{
    fn send_order(
        &self,
        intent: OrderIntent,
        listener: Box<dyn OrderEventListener>,
    ) -> Result<Box<dyn OrderManagement>, BrokerError> {
        let request = self.volume_request(&intent);

        let span = tracing::info_span!(
            "order.submit",
            symbol = %intent.symbol(),
            side = %intent.side(),
            order_type = %intent.order_type(),
        );
        let _guard = span.enter();

        let Some(reservation) = self.money_management.request_volume(&request) else {
            tracing::info!(
                stop_distance = %request.stop_distance,
                "Money management did not provide volume"
            );
            return Err(BrokerError::VolumeDenied);
        };

        let volume = reservation.volume();
        let returner = VolumeReturner::new(reservation, listener);
        tracing::debug!(
            reservation_id = %returner.id(),
            volume = %volume,
            stop_distance = %request.stop_distance,
            "Money management granted volume"
        );

        let order = intent.with_volume(volume);
        match self.broker.send_order(order, Box::new(returner.clone())) {
            Ok(order_management) => {
                returner.bind_order_management(order_management);
                tracing::info!(
                    reservation_id = %returner.id(),
                    volume = %volume,
                    "Order accepted by broker"
                );
                Ok(Box::new(returner))
            }
            Err(error) => {
                tracing::warn!(
                    reservation_id = %returner.id(),
                    error = %error,
                    "Broker refused order, returning reserved volume"
                );
                returner.release(ReleaseTrigger::Rollback);
                Err(error)
            }
        }
    }
}

impl<B, M> MarketDataListener for VolumeManagedBroker<B, M> {
    fn on_market_data(&self, candle: &Candle) {
        self.on_price_update(candle.close);
    }
}
