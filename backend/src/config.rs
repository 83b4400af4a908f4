//! Configuration management for the InventoryPro metrics server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with IVP_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{Currency, MetricsResult, PricingConfig};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Order pricing parameters
    pub pricing: PricingSettings,

    /// Display currency
    pub currency: CurrencyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    /// Tax rate as a fraction of the subtotal (0.18 = 18%)
    pub tax_rate: Decimal,

    /// Flat shipping fee per non-empty order
    pub shipping_fee: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CurrencyConfig {
    /// ISO code shown next to amounts (RWF, UGX)
    pub code: Currency,
}

impl PricingSettings {
    /// Checked conversion into the calculator's parameters
    pub fn to_pricing(&self) -> MetricsResult<PricingConfig> {
        PricingConfig::new(self.tax_rate, self.shipping_fee)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("IVP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("pricing.tax_rate", PricingConfig::DEFAULT_TAX_RATE.to_string())?
            .set_default("pricing.shipping_fee", PricingConfig::DEFAULT_SHIPPING_FEE.to_string())?
            .set_default("currency.code", Currency::default().code())?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (IVP_ prefix)
            .add_source(
                Environment::with_prefix("IVP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            pricing: PricingSettings::default(),
            currency: CurrencyConfig {
                code: Currency::default(),
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        let pricing = PricingConfig::default();
        Self {
            tax_rate: pricing.tax_rate,
            shipping_fee: pricing.shipping_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pricing_converts() {
        let pricing = Config::default().pricing.to_pricing().unwrap();
        assert_eq!(pricing, PricingConfig::default());
    }

    #[test]
    fn test_out_of_range_tax_rejected() {
        let settings = PricingSettings {
            tax_rate: Decimal::from(2),
            shipping_fee: Decimal::ZERO,
        };
        assert!(settings.to_pricing().is_err());
    }
}
