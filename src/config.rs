//! Store configuration
//!
//! Read from YAML. Every field is optional; missing fields take the values
//! the storefront ships with.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    checkout::Checkout,
    location::DEFAULT_LOCATION,
    pricing::{Price, PricingError, currency_for_code, parse_price},
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid currency or delivery fee
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The delivery fee is not in the store currency (fee currency, store currency).
    #[error("Delivery fee is in {0}, but store currency is {1}")]
    FeeCurrencyMismatch(&'static str, &'static str),

    /// The menu is not in the store currency (menu currency, store currency).
    #[error("Menu is priced in {0}, but store currency is {1}")]
    MenuCurrencyMismatch(&'static str, &'static str),
}

/// Storefront settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// ISO code of the store currency
    pub currency: String,

    /// Delivery fee charged per order (e.g., "2.99 INR")
    pub delivery_fee: String,

    /// Simulated menu load latency in milliseconds
    pub menu_delay_ms: u64,

    /// Simulated restaurant listing latency in milliseconds
    pub restaurants_delay_ms: u64,

    /// Location used until the customer picks one
    pub default_location: String,

    /// Path of a YAML menu to use instead of the embedded one
    pub menu_path: Option<PathBuf>,

    /// File holding persisted settings such as the theme
    pub settings_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            delivery_fee: "2.99 INR".to_string(),
            menu_delay_ms: 1000,
            restaurants_delay_ms: 1500,
            default_location: DEFAULT_LOCATION.to_string(),
            menu_path: None,
            settings_path: PathBuf::from("feedo-settings.yml"),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or contains unknown fields.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_norway::from_str(yaml)?)
    }

    /// Store currency
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pricing`] for an unsupported currency code.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        Ok(currency_for_code(&self.currency)?)
    }

    /// Delivery fee, checked against the store currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the fee cannot be parsed or is in another currency.
    pub fn delivery_fee(&self) -> Result<Price, ConfigError> {
        let currency = self.currency()?;
        let fee = parse_price(&self.delivery_fee)?;

        if fee.currency() != currency {
            return Err(ConfigError::FeeCurrencyMismatch(
                fee.currency().iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        Ok(fee)
    }

    /// Check that a loaded menu is priced in the store currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MenuCurrencyMismatch`] if the currencies differ.
    pub fn check_menu(&self, menu: &Catalog) -> Result<(), ConfigError> {
        let currency = self.currency()?;

        if menu.currency() != currency {
            return Err(ConfigError::MenuCurrencyMismatch(
                menu.currency().iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        Ok(())
    }

    /// Checkout policy built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the delivery fee is invalid.
    pub fn checkout(&self) -> Result<Checkout, ConfigError> {
        Ok(Checkout::new(self.delivery_fee()?))
    }

    /// Menu load latency
    pub fn menu_delay(&self) -> Duration {
        Duration::from_millis(self.menu_delay_ms)
    }

    /// Restaurant listing latency
    pub fn restaurants_delay(&self) -> Duration {
        Duration::from_millis(self.restaurants_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rusty_money::{
        Money,
        iso::{GBP, INR},
    };
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use super::*;
    use crate::{
        catalog::fixtures::EmbeddedCatalog,
        loading::{DataSource, MENU_LOAD_DELAY, RESTAURANTS_LOAD_DELAY},
    };

    #[test]
    fn defaults_match_storefront() -> TestResult {
        let config = StoreConfig::default();

        assert_eq!(config.currency()?, INR);
        assert_eq!(config.delivery_fee()?, Money::from_minor(299, INR));
        assert_eq!(config.menu_delay(), MENU_LOAD_DELAY);
        assert_eq!(config.restaurants_delay(), RESTAURANTS_LOAD_DELAY);
        assert_eq!(config.default_location, "New York");
        assert!(config.menu_path.is_none());

        Ok(())
    }

    #[test]
    fn empty_yaml_is_default() -> TestResult {
        let config = StoreConfig::from_yaml("")?;

        assert_eq!(config.currency, "INR");

        Ok(())
    }

    #[test]
    fn partial_yaml_overrides_fields() -> TestResult {
        let config = StoreConfig::from_yaml(
            "currency: GBP\ndelivery_fee: 1.50 GBP\nmenu_delay_ms: 0\n",
        )?;

        assert_eq!(config.currency()?, GBP);
        assert_eq!(
            config.checkout()?.delivery_fee(),
            Money::from_minor(150, GBP)
        );
        assert_eq!(config.menu_delay(), Duration::ZERO);
        assert_eq!(config.restaurants_delay_ms, 1500);

        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            StoreConfig::from_yaml("colour: blue\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn fee_in_other_currency_is_rejected() -> TestResult {
        let config = StoreConfig::from_yaml("currency: INR\ndelivery_fee: 2.99 USD\n")?;

        assert!(matches!(
            config.delivery_fee(),
            Err(ConfigError::FeeCurrencyMismatch("USD", "INR"))
        ));

        Ok(())
    }

    #[test]
    fn menu_in_store_currency_is_accepted() -> TestResult {
        let menu = EmbeddedCatalog.load()?;

        StoreConfig::default().check_menu(&menu)?;

        Ok(())
    }

    #[test]
    fn menu_in_other_currency_is_rejected() -> TestResult {
        let config = StoreConfig::from_yaml("currency: GBP\ndelivery_fee: 1.50 GBP\n")?;
        let menu = EmbeddedCatalog.load()?;

        config.checkout()?;

        assert!(matches!(
            config.check_menu(&menu),
            Err(ConfigError::MenuCurrencyMismatch("INR", "GBP"))
        ));

        Ok(())
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "default_location: Mumbai")?;

        let config = StoreConfig::load(file.path())?;

        assert_eq!(config.default_location, "Mumbai");

        Ok(())
    }
}
