//! Money Management Port (Driven Port)
//!
//! Interface for requesting tradable volume from a money management policy.
//!
//! Granted volume is held as a [`VolumeReservation`] until the order using it
//! ends. Releasing consumes the reservation, so it can only happen once.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{ForexSymbol, Price, Volume};

/// Everything a money management policy needs to size one trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRequest {
    /// The symbol that should be traded.
    pub symbol: ForexSymbol,
    /// Last known close price of `symbol`.
    pub price: Price,
    /// Symbol converting the account currency to the quote currency of `symbol`.
    pub account_currency_exchange_symbol: ForexSymbol,
    /// Last known price of `account_currency_exchange_symbol`.
    pub account_currency_exchange_rate: Price,
    /// Distance between entry price and stop-loss of the order.
    pub stop_distance: Price,
    /// Granted volume must be a multiple of this step.
    pub allowed_step_size: Volume,
}

/// Volume granted by a money management policy for one order.
pub trait VolumeReservation {
    /// The granted volume.
    fn volume(&self) -> Volume;

    /// Return the volume to the money management.
    fn release(self: Box<Self>);
}

/// Port for money management policies.
pub trait MoneyManagement {
    /// Request volume for a trade.
    ///
    /// Returns `None` when the policy does not allow a new trade.
    fn request_volume(&self, request: &VolumeRequest) -> Option<Box<dyn VolumeReservation>>;
}

impl<M: MoneyManagement + ?Sized> MoneyManagement for &M {
    fn request_volume(&self, request: &VolumeRequest) -> Option<Box<dyn VolumeReservation>> {
        (**self).request_volume(request)
    }
}

impl<M: MoneyManagement + ?Sized> MoneyManagement for std::rc::Rc<M> {
    fn request_volume(&self, request: &VolumeRequest) -> Option<Box<dyn VolumeReservation>> {
        (**self).request_volume(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountedReservation {
        volume: Volume,
        releases: Rc<Cell<u32>>,
    }

    impl VolumeReservation for CountedReservation {
        fn volume(&self) -> Volume {
            self.volume
        }

        fn release(self: Box<Self>) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    struct FixedPolicy {
        releases: Rc<Cell<u32>>,
    }

    impl MoneyManagement for FixedPolicy {
        fn request_volume(&self, request: &VolumeRequest) -> Option<Box<dyn VolumeReservation>> {
            if request.stop_distance.is_zero() {
                return None;
            }
            Some(Box::new(CountedReservation {
                volume: request.allowed_step_size,
                releases: Rc::clone(&self.releases),
            }))
        }
    }

    fn request(stop_distance: Price) -> VolumeRequest {
        VolumeRequest {
            symbol: ForexSymbol::parse("EURUSD").unwrap(),
            price: Price::new(dec!(1.2)),
            account_currency_exchange_symbol: ForexSymbol::parse("EURUSD").unwrap(),
            account_currency_exchange_rate: Price::new(dec!(1.2)),
            stop_distance,
            allowed_step_size: Volume::from_lots(dec!(0.01)),
        }
    }

    #[test]
    fn reservation_release_consumes_the_handle() {
        let releases = Rc::new(Cell::new(0));
        let policy = Rc::new(FixedPolicy {
            releases: Rc::clone(&releases),
        });

        let reservation = policy
            .request_volume(&request(Price::new(dec!(0.0050))))
            .unwrap();
        assert_eq!(reservation.volume(), Volume::from_lots(dec!(0.01)));

        reservation.release();
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn policy_may_decline() {
        let policy = FixedPolicy {
            releases: Rc::new(Cell::new(0)),
        };
        assert!((&policy).request_volume(&request(Price::ZERO)).is_none());
    }
}
