//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `ENTITLEMENTS` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use entitlements::adapters::memory::MemoryStore;
//! use entitlements::adapters::stripe::{StripeConfig, StripeGatewayAdapter};
//! use entitlements::application::handlers::catalog::LoadUserOffersHandler;
//! use entitlements::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let gateway = StripeGatewayAdapter::new(StripeConfig::from_payment_config(&config.payment));
//! let store = Arc::new(MemoryStore::new());
//! let catalog =
//!     LoadUserOffersHandler::new(store.clone(), store, config.catalog.default_offer_group);
//! ```

mod catalog;
mod error;
mod payment;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Payment gateway configuration
    pub payment: PaymentConfig,

    /// Catalog configuration (default offer group)
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads variables with the
    /// `ENTITLEMENTS` prefix, e.g.
    /// `ENTITLEMENTS__PAYMENT__GATEWAY_API_KEY=sk_test_xxx`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ENTITLEMENTS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.payment.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}
