//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid gateway API key format")]
    InvalidGatewayKey,

    #[error("Invalid gateway webhook secret format")]
    InvalidGatewayWebhookSecret,

    #[error("Invalid currency code, expected three lowercase letters")]
    InvalidCurrency,

    #[error("Default offer group must not be empty")]
    EmptyOfferGroup,
}
