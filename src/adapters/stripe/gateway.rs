//! Stripe gateway adapter and configuration.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{
    IntentHandle, IntentStatus, IntentStatusObserved, ObservationChannel, PaymentError,
    WebhookVerifier,
};
use crate::ports::PaymentGateway;

use super::webhook_types::{StripePaymentIntent, StripeWebhookEvent};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Whether to require livemode events in production.
    require_livemode: bool,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            require_livemode: false,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Require livemode events in production.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }

    /// Build an adapter configuration from the loaded payment config.
    ///
    /// Livemode events are required exactly when the API key is a live key,
    /// so a live deployment rejects test-mode webhook deliveries.
    pub fn from_payment_config(payment: &crate::config::PaymentConfig) -> Self {
        Self::new(
            payment.gateway_api_key.as_str(),
            payment.gateway_webhook_secret.as_str(),
        )
        .with_require_livemode(payment.is_live_mode())
    }
}

/// Stripe payment gateway adapter.
pub struct StripeGatewayAdapter {
    config: StripeConfig,
    verifier: WebhookVerifier,
    http_client: reqwest::Client,
}

impl StripeGatewayAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        let verifier = WebhookVerifier::new(config.webhook_secret.expose_secret().clone());
        Self {
            config,
            verifier,
            http_client: reqwest::Client::new(),
        }
    }

    fn map_intent_status(intent: &StripePaymentIntent) -> IntentStatus {
        match intent.status.as_str() {
            "succeeded" => IntentStatus::Succeeded,
            "requires_payment_method" => IntentStatus::RequiresPaymentMethod,
            "requires_action" => IntentStatus::RequiresAction(
                intent
                    .next_action
                    .as_ref()
                    .map(|a| a.action_type.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
            other => IntentStatus::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGatewayAdapter {
    async fn create_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        description: &str,
    ) -> Result<IntentHandle, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let params = [
            ("amount", amount_minor_units.to_string()),
            ("currency", currency.to_string()),
            ("description", description.to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::intent_creation(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe create_intent failed");
            return Err(PaymentError::intent_creation(format!(
                "Stripe API error: {}",
                error_text
            )));
        }

        let intent: StripePaymentIntent = response
            .json()
            .await
            .map_err(|e| PaymentError::intent_creation(format!("invalid response: {}", e)))?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            PaymentError::intent_creation("response carried no client_secret")
        })?;

        Ok(IntentHandle {
            id: intent.id,
            client_secret,
        })
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<IntentStatus, PaymentError> {
        let url = format!(
            "{}/v1/payment_intents/{}",
            self.config.api_base_url, intent_id
        );

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::intent_retrieval(intent_id, e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(intent_id, error = %error_text, "Stripe retrieve_intent failed");
            return Err(PaymentError::intent_retrieval(
                intent_id,
                format!("Stripe API error: {}", error_text),
            ));
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::intent_retrieval(intent_id, format!("invalid response: {}", e))
        })?;

        Ok(Self::map_intent_status(&intent))
    }

    fn verify_webhook(
        &self,
        raw_body: &[u8],
        signature_header: &str,
    ) -> Result<IntentStatusObserved, PaymentError> {
        self.verifier.verify(raw_body, signature_header)?;

        let event: StripeWebhookEvent = serde_json::from_slice(raw_body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::webhook_verification(format!("Invalid JSON: {}", e))
        })?;

        if self.config.require_livemode && !event.livemode {
            tracing::warn!(event_id = %event.id, "Rejected test mode event in production");
            return Err(PaymentError::webhook_verification(
                "Test mode events not allowed in production",
            ));
        }

        if !event.event_type.starts_with("payment_intent.") {
            return Err(PaymentError::webhook_verification(format!(
                "Unhandled event type: {}",
                event.event_type
            )));
        }

        let intent: StripePaymentIntent =
            serde_json::from_value(event.data.object).map_err(|e| {
                PaymentError::webhook_verification(format!("Invalid payment intent: {}", e))
            })?;

        let created = u64::try_from(event.created).unwrap_or(0);

        Ok(IntentStatusObserved {
            intent_id: intent.id.clone(),
            status: Self::map_intent_status(&intent),
            observed_at: Timestamp::from_unix_secs(created),
            channel: ObservationChannel::Webhook,
        })
    }
}
