//! Payment gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

fn default_currency() -> String {
    "usd".to_string()
}

/// Payment gateway configuration (Stripe-compatible)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Gateway API key
    pub gateway_api_key: String,

    /// Gateway webhook signing secret
    pub gateway_webhook_secret: String,

    /// ISO 4217 currency code, lowercase
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            gateway_api_key: String::new(),
            gateway_webhook_secret: String::new(),
            currency: default_currency(),
        }
    }
}

impl PaymentConfig {
    /// Check if using gateway test mode
    pub fn is_test_mode(&self) -> bool {
        self.gateway_api_key.starts_with("sk_test_")
    }

    /// Check if using gateway live mode
    pub fn is_live_mode(&self) -> bool {
        self.gateway_api_key.starts_with("sk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gateway_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_API_KEY"));
        }
        if self.gateway_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !self.gateway_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidGatewayKey);
        }
        if !self.gateway_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidGatewayWebhookSecret);
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::InvalidCurrency);
        }

        Ok(())
    }
}
