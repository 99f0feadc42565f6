//! Configuration module for the order mediator.
//!
//! Loads the traded symbol, sizing limits and logging settings from YAML,
//! with environment variable interpolation, and assembles the broker
//! decorators from them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_mediator::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! let broker = config.build_broker(simulated_broker, config.build_money_management()?)?;
//! ```

mod observability;
mod trading;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LoggingConfig, ObservabilityConfig};
pub use trading::{MoneyManagementConfig, TradingConfig};

use crate::application::services::VolumeManagedBroker;
use crate::domain::shared::DomainError;
use crate::infrastructure::money_management::FixedRiskMoneyManagement;

/// Log formats understood by [`crate::observability::init_logging`].
pub const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Rule name reported when the exchange symbol cannot convert the account
/// currency into the traded quote currency.
pub const EXCHANGE_SYMBOL_RULE: &str = "account_currency_exchange_symbol";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

impl From<DomainError> for ConfigError {
    fn from(error: DomainError) -> Self {
        Self::ValidationError(error.to_string())
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediatorConfig {
    /// Traded symbol and volume granularity.
    pub trading: TradingConfig,
    /// Fixed-risk sizing limits.
    #[serde(default)]
    pub money_management: MoneyManagementConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl MediatorConfig {
    /// Build the fixed-risk money management described by this config.
    ///
    /// # Errors
    ///
    /// Returns error if the sizing limits are not positive.
    pub fn build_money_management(&self) -> Result<FixedRiskMoneyManagement, DomainError> {
        FixedRiskMoneyManagement::new(
            self.money_management.risk_per_trade,
            self.money_management.max_total_volume,
        )
    }

    /// Wrap `broker` in a [`VolumeManagedBroker`] trading the configured
    /// symbol.
    ///
    /// # Errors
    ///
    /// Returns error if the configured step size is not positive.
    pub fn build_broker<B, M>(
        &self,
        broker: B,
        money_management: M,
    ) -> Result<VolumeManagedBroker<B, M>, DomainError> {
        VolumeManagedBroker::new(
            broker,
            money_management,
            self.trading.symbol.clone(),
            self.trading.account_currency_exchange_symbol.clone(),
            self.trading.volume_step_size,
        )
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<MediatorConfig, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<MediatorConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: MediatorConfig = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &MediatorConfig) -> Result<(), ConfigError> {
    config.trading.volume_step_size.validate_step_size()?;

    let quote = config.trading.symbol.quote_currency();
    let exchange = &config.trading.account_currency_exchange_symbol;
    if !exchange.involves(quote) {
        return Err(DomainError::business_rule(
            EXCHANGE_SYMBOL_RULE,
            format!("{exchange} must involve the quote currency {quote}"),
        )
        .into());
    }

    if config.money_management.risk_per_trade <= rust_decimal::Decimal::ZERO {
        return Err(ConfigError::ValidationError(
            "money_management.risk_per_trade must be positive".to_string(),
        ));
    }

    if !config.money_management.max_total_volume.is_positive() {
        return Err(ConfigError::ValidationError(
            "money_management.max_total_volume must be positive".to_string(),
        ));
    }

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Volume;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const MINIMAL: &str = r"
trading:
  symbol: EURUSD
  account_currency_exchange_symbol: EURUSD
";

    #[test]
    fn test_load_minimal_config() {
        let config = match load_config_from_string(MINIMAL) {
            Ok(c) => c,
            Err(e) => panic!("should load minimal config: {e}"),
        };

        assert_eq!(config.trading.symbol.as_str(), "EURUSD");
        assert_eq!(config.trading.volume_step_size, Volume::from_lots(dec!(0.01)));
        assert_eq!(config.money_management.risk_per_trade, dec!(100));
        assert_eq!(config.observability.logging.level, "info");
        assert_eq!(config.observability.logging.format, "json");
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
trading:
  symbol: gbpjpy
  account_currency_exchange_symbol: EURJPY
  volume_step_size: "0.1"

money_management:
  risk_per_trade: "250"
  max_total_volume: "3"

observability:
  logging:
    level: "debug"
    format: "pretty"
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load full config: {e}"),
        };

        assert_eq!(config.trading.symbol.as_str(), "GBPJPY");
        assert_eq!(config.trading.account_currency_exchange_symbol.as_str(), "EURJPY");
        assert_eq!(config.trading.volume_step_size, Volume::from_lots(dec!(0.1)));
        assert_eq!(config.money_management.risk_per_trade, dec!(250));
        assert_eq!(config.money_management.max_total_volume, Volume::from_lots(dec!(3)));
        assert_eq!(config.observability.logging.level, "debug");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "symbol: ${MEDIATOR_CONFIG_TEST_NONEXISTENT_VAR:-EURUSD}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "symbol: EURUSD");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "level: ${MEDIATOR_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);

        assert_eq!(result, "level: ");
    }

    #[test]
    fn test_validation_rejects_zero_step_size() {
        let yaml = r#"
trading:
  symbol: EURUSD
  account_currency_exchange_symbol: EURUSD
  volume_step_size: "0"
"#;

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero step size");
        };
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validation_rejects_unrelated_exchange_symbol() {
        let yaml = r"
trading:
  symbol: EURUSD
  account_currency_exchange_symbol: GBPJPY
";

        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for unrelated exchange symbol");
        };
        let expected = DomainError::business_rule(
            EXCHANGE_SYMBOL_RULE,
            "GBPJPY must involve the quote currency USD",
        );
        assert_eq!(err.to_string(), ConfigError::from(expected).to_string());
        assert!(err.to_string().contains("USD"));
    }

    #[test]
    fn test_validation_rejects_unknown_log_format() {
        let yaml = format!("{MINIMAL}observability:\n  logging:\n    format: xml\n");

        let Err(err) = load_config_from_string(&yaml) else {
            panic!("expected error for log format");
        };
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_invalid_symbol_is_parse_error() {
        let yaml = r"
trading:
  symbol: EUR
  account_currency_exchange_symbol: EURUSD
";

        assert!(matches!(
            load_config_from_string(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = load_config(file.path().to_str()).unwrap();

        assert_eq!(config.trading.symbol.as_str(), "EURUSD");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = load_config(Some("/nonexistent/order-mediator.yaml"));

        let Err(ConfigError::ReadError { path, .. }) = result else {
            panic!("expected read error");
        };
        assert_eq!(path, "/nonexistent/order-mediator.yaml");
    }

    #[test]
    fn test_build_broker_uses_trading_section() {
        let config = load_config_from_string(MINIMAL).unwrap();
        let money_management = config.build_money_management().unwrap();

        let broker = config.build_broker((), money_management).unwrap();

        assert_eq!(broker.symbol().as_str(), "EURUSD");
        assert_eq!(broker.allowed_step_size(), Volume::from_lots(dec!(0.01)));
        assert!(broker.last_price().is_none());
    }
}
