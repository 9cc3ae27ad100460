//! # Shop Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PETAL_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no lock needed.
//! If hot-reloading is added later, we'd wrap in `RwLock`.

use serde::{Deserialize, Serialize};

use petal_core::Money;

/// Shop configuration.
///
/// ## Fields
/// Every field has a sensible default for development; deployments override
/// through the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// Shop name (displayed on receipts)
    pub store_name: String,

    /// Shop address lines (for receipts)
    pub store_address: Vec<String>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Delivery fee used when checkout doesn't supply one
    pub default_delivery_fee: Money,

    /// Raw inventory at or below this level counts as low stock
    pub low_stock_threshold: i64,
}

impl Default for ShopConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Shop: "Petal & Stem"
    /// - Currency: $ with 2 decimals
    /// - Delivery fee: $10.00
    /// - Low stock threshold: 5
    fn default() -> Self {
        ShopConfig {
            store_name: "Petal & Stem".to_string(),
            store_address: vec![
                "14 Garden Lane".to_string(),
                "Bloomfield, OR 97002".to_string(),
            ],
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            default_delivery_fee: Money::from_major_minor(10, 0),
            low_stock_threshold: 5,
        }
    }
}

impl ShopConfig {
    /// Creates a new ShopConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PETAL_STORE_NAME`: Override shop name
    /// - `PETAL_CURRENCY_SYMBOL`: Override currency symbol
    /// - `PETAL_DELIVERY_FEE`: Override default delivery fee (e.g., "12.50")
    /// - `PETAL_LOW_STOCK_THRESHOLD`: Override low stock level
    pub fn from_env() -> Self {
        let mut config = ShopConfig::default();

        if let Ok(store_name) = std::env::var("PETAL_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(symbol) = std::env::var("PETAL_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Ok(fee_str) = std::env::var("PETAL_DELIVERY_FEE") {
            if let Ok(fee) = fee_str.parse::<rust_decimal::Decimal>() {
                if fee.is_sign_positive() || fee.is_zero() {
                    config.default_delivery_fee = Money::new(fee);
                }
            }
        }

        if let Ok(threshold_str) = std::env::var("PETAL_LOW_STOCK_THRESHOLD") {
            if let Ok(threshold) = threshold_str.parse::<i64>() {
                config.low_stock_threshold = threshold.max(0);
            }
        }

        config
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use petal_core::Money;
    /// use petal_store::config::ShopConfig;
    ///
    /// let config = ShopConfig::default();
    /// assert_eq!(config.format_money(Money::from_major_minor(12, 34)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let rounded = amount.rounded().amount();
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{}{}{:.prec$}",
            sign,
            self.currency_symbol,
            rounded.abs(),
            prec = self.currency_decimals as usize
        )
    }
}
