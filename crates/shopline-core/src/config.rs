//! # Checkout Configuration
//!
//! Settings for the checkout pipeline, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPLINE_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::money::Money;
use crate::shipping::{ShipmentGrouping, DEFAULT_SHIPPING_RATE_PER_KG};

pub const ENV_STORE_NAME: &str = "SHOPLINE_STORE_NAME";
pub const ENV_SHIPPING_RATE: &str = "SHOPLINE_SHIPPING_RATE";
pub const ENV_SHIPMENT_GROUPING: &str = "SHOPLINE_SHIPMENT_GROUPING";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Store name recorded on receipts.
    pub store_name: String,

    /// Shipping price per kilogram of shipped weight.
    pub shipping_rate_per_kg: Money,

    /// How shipment notices group units.
    pub shipment_grouping: ShipmentGrouping,
}

impl Default for CheckoutConfig {
    /// ## Default Values
    /// - Store: "Shopline Dev Store"
    /// - Shipping: 30.00 per kg
    /// - Notices grouped by product name
    fn default() -> Self {
        CheckoutConfig {
            store_name: "Shopline Dev Store".to_string(),
            shipping_rate_per_kg: DEFAULT_SHIPPING_RATE_PER_KG,
            shipment_grouping: ShipmentGrouping::ByName,
        }
    }
}

impl CheckoutConfig {
    /// Loads configuration from environment variables over the defaults.
    ///
    /// ## Environment Variables
    /// - `SHOPLINE_STORE_NAME`: store name on receipts
    /// - `SHOPLINE_SHIPPING_RATE`: rate per kg as a decimal (e.g. "30.00")
    /// - `SHOPLINE_SHIPMENT_GROUPING`: `name` or `product`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// ```rust
    /// use shopline_core::{CheckoutConfig, Money};
    ///
    /// let config = CheckoutConfig::from_lookup(|key| match key {
    ///     "SHOPLINE_SHIPPING_RATE" => Some("12.50".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.shipping_rate_per_kg, Money::from_cents(1250));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CheckoutConfig::default();

        if let Some(store_name) = lookup(ENV_STORE_NAME) {
            if store_name.trim().is_empty() {
                return Err(invalid(ENV_STORE_NAME, "must not be empty"));
            }
            config.store_name = store_name;
        }

        if let Some(rate) = lookup(ENV_SHIPPING_RATE) {
            config.shipping_rate_per_kg =
                Money::parse_decimal(&rate).map_err(|e| invalid(ENV_SHIPPING_RATE, &e.to_string()))?;
        }

        if let Some(grouping) = lookup(ENV_SHIPMENT_GROUPING) {
            config.shipment_grouping = grouping
                .parse()
                .map_err(|reason: String| invalid(ENV_SHIPMENT_GROUPING, &reason))?;
        }

        Ok(config)
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = CheckoutConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CheckoutConfig::default());
        assert_eq!(config.shipping_rate_per_kg, Money::from_major(30));
        assert_eq!(config.shipment_grouping, ShipmentGrouping::ByName);
    }

    #[test]
    fn test_overrides() {
        let config = CheckoutConfig::from_lookup(lookup_from(&[
            (ENV_STORE_NAME, "Corner Shop"),
            (ENV_SHIPPING_RATE, "7.5"),
            (ENV_SHIPMENT_GROUPING, "product"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.shipping_rate_per_kg, Money::from_cents(750));
        assert_eq!(config.shipment_grouping, ShipmentGrouping::ByProduct);
    }

    #[test]
    fn test_invalid_values() {
        let err = CheckoutConfig::from_lookup(lookup_from(&[(ENV_SHIPPING_RATE, "-3")]))
            .unwrap_err();
        assert!(err.to_string().starts_with("Invalid value for SHOPLINE_SHIPPING_RATE"));

        assert!(CheckoutConfig::from_lookup(lookup_from(&[(ENV_SHIPMENT_GROUPING, "sku")])).is_err());
        assert!(CheckoutConfig::from_lookup(lookup_from(&[(ENV_STORE_NAME, " ")])).is_err());
    }
}
