//! Trading and money management configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{ForexSymbol, Volume};

/// What is traded and how volumes are sized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    /// The traded symbol, e.g. `EURUSD`.
    pub symbol: ForexSymbol,
    /// Converts the account currency to the traded symbol's quote currency.
    pub account_currency_exchange_symbol: ForexSymbol,
    /// Granted volumes are multiples of this many lots.
    #[serde(default = "default_volume_step_size")]
    pub volume_step_size: Volume,
}

/// Fixed-risk money management limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoneyManagementConfig {
    /// Account currency lost when a trade hits its stop-loss.
    #[serde(default = "default_risk_per_trade")]
    pub risk_per_trade: Decimal,
    /// Upper bound for the volume of all open reservations together.
    #[serde(default = "default_max_total_volume")]
    pub max_total_volume: Volume,
}

impl Default for MoneyManagementConfig {
    fn default() -> Self {
        Self {
            risk_per_trade: default_risk_per_trade(),
            max_total_volume: default_max_total_volume(),
        }
    }
}

const fn default_volume_step_size() -> Volume {
    Volume::from_lots(dec!(0.01))
}

const fn default_risk_per_trade() -> Decimal {
    dec!(100)
}

const fn default_max_total_volume() -> Volume {
    Volume::from_lots(dec!(1))
}
