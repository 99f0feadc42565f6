//! Fixed-risk money management.
//!
//! Sizes every trade so that hitting the stop-loss loses a fixed amount of
//! account currency, and caps the volume all open reservations may hold
//! together.

use std::cell::Cell;
use std::rc::Rc;

use rust_decimal::Decimal;

use crate::application::ports::{MoneyManagement, VolumeRequest, VolumeReservation};
use crate::domain::shared::{DomainError, Volume};

/// Volume currently handed out, shared with every live reservation.
#[derive(Debug, Default)]
struct VolumePool {
    reserved: Cell<Volume>,
    outstanding: Cell<u32>,
}

/// In-memory money management risking a fixed amount per trade.
///
/// Suitable for backtests and paper trading. Reservations hold on to the
/// pool, so volume comes back even if the policy itself was dropped.
#[derive(Debug)]
pub struct FixedRiskMoneyManagement {
    risk_per_trade: Decimal,
    max_total_volume: Volume,
    pool: Rc<VolumePool>,
}

impl FixedRiskMoneyManagement {
    /// Create a policy risking `risk_per_trade` units of account currency per
    /// trade, never reserving more than `max_total_volume` at once.
    ///
    /// # Errors
    ///
    /// Returns error if either limit is not positive.
    pub fn new(risk_per_trade: Decimal, max_total_volume: Volume) -> Result<Self, DomainError> {
        if risk_per_trade <= Decimal::ZERO {
            return Err(DomainError::invalid_value(
                "risk_per_trade",
                "Risk per trade must be positive",
            ));
        }
        if !max_total_volume.is_positive() {
            return Err(DomainError::invalid_value(
                "max_total_volume",
                "Maximum total volume must be positive",
            ));
        }
        Ok(Self {
            risk_per_trade,
            max_total_volume,
            pool: Rc::new(VolumePool::default()),
        })
    }

    /// Volume held by reservations that were not released yet.
    #[must_use]
    pub fn reserved_volume(&self) -> Volume {
        self.pool.reserved.get()
    }

    /// Number of reservations that were not released yet.
    #[must_use]
    pub fn outstanding_reservations(&self) -> u32 {
        self.pool.outstanding.get()
    }

    /// Loss in account currency per base unit if the stop-loss is hit.
    ///
    /// `None` if the loss is zero or not representable.
    fn loss_per_unit(request: &VolumeRequest) -> Option<Decimal> {
        let distance = request.stop_distance.value();
        let rate = request.account_currency_exchange_rate.value();
        if distance <= Decimal::ZERO || rate <= Decimal::ZERO {
            return None;
        }

        let quote = request.symbol.quote_currency();
        let exchange = &request.account_currency_exchange_symbol;
        // QUOTE/ACCOUNT prices one quote unit in account currency,
        // ACCOUNT/QUOTE the other way round.
        let loss = if exchange.base_currency() == quote && exchange.quote_currency() != quote {
            distance.checked_mul(rate)?
        } else {
            distance.checked_div(rate)?
        };
        (loss > Decimal::ZERO).then_some(loss)
    }

    /// Lots that lose exactly `risk_per_trade` at the stop-loss.
    fn sized_lots(&self, request: &VolumeRequest) -> Option<Decimal> {
        Self::loss_per_unit(request)?
            .checked_mul(Volume::UNITS_PER_LOT)
            .and_then(|loss_per_lot| self.risk_per_trade.checked_div(loss_per_lot))
    }
}

impl MoneyManagement for FixedRiskMoneyManagement {
    fn request_volume(&self, request: &VolumeRequest) -> Option<Box<dyn VolumeReservation>> {
        let Some(lots) = self.sized_lots(request) else {
            tracing::debug!(
                stop_distance = %request.stop_distance,
                exchange_rate = %request.account_currency_exchange_rate,
                "Cannot size trade from this stop distance and exchange rate"
            );
            return None;
        };

        let sized = Volume::from_lots(lots);
        let available = self.max_total_volume - self.pool.reserved.get();
        // Capping first keeps the step division within range.
        let volume = sized.min(available).round_down_to_step(request.allowed_step_size);

        if !volume.is_positive() {
            tracing::info!(
                sized = %sized,
                available = %available,
                "No volume left for a new trade"
            );
            return None;
        }

        self.pool.reserved.set(self.pool.reserved.get() + volume);
        self.pool.outstanding.set(self.pool.outstanding.get() + 1);
        tracing::debug!(
            symbol = %request.symbol,
            volume = %volume,
            reserved = %self.pool.reserved.get(),
            "Reserved volume"
        );

        Some(Box::new(FixedRiskReservation {
            volume,
            pool: Rc::clone(&self.pool),
        }))
    }
}

/// Volume taken out of a [`VolumePool`].
struct FixedRiskReservation {
    volume: Volume,
    pool: Rc<VolumePool>,
}

impl VolumeReservation for FixedRiskReservation {
    fn volume(&self) -> Volume {
        self.volume
    }

    fn release(self: Box<Self>) {
        self.pool.reserved.set(self.pool.reserved.get() - self.volume);
        self.pool
            .outstanding
            .set(self.pool.outstanding.get().saturating_sub(1));
    }
}
