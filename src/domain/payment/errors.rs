//! Payment error taxonomy.
//!
//! Every gateway-call failure, webhook-verification failure, or
//! invalid-state call surfaces as a `PaymentError` carrying the underlying
//! cause. The crate performs no local recovery; callers own retry policy.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by payment-gateway interactions.
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    /// The gateway call to create a payment intent failed.
    #[error("Error creating payment intent: {cause}")]
    IntentCreation { cause: String },

    /// The gateway call to retrieve a payment intent failed.
    #[error("Error retrieving payment intent '{intent_id}': {cause}")]
    IntentRetrieval { intent_id: String, cause: String },

    /// Payment execution was requested for an order with no intent.
    #[error("No payment intent was created for this order")]
    NoIntent,

    /// Webhook signature or payload verification failed. Fails closed.
    #[error("Error handling webhook event: {cause}")]
    WebhookVerification { cause: String },

    /// Any other gateway-side failure.
    #[error("Payment gateway error: {cause}")]
    Gateway { cause: String },
}

impl PaymentError {
    /// Gateway failure while creating an intent.
    pub fn intent_creation(cause: impl ToString) -> Self {
        PaymentError::IntentCreation {
            cause: cause.to_string(),
        }
    }

    /// Gateway failure while retrieving an intent.
    pub fn intent_retrieval(intent_id: impl Into<String>, cause: impl ToString) -> Self {
        PaymentError::IntentRetrieval {
            intent_id: intent_id.into(),
            cause: cause.to_string(),
        }
    }

    /// Webhook verification or parsing failure.
    pub fn webhook_verification(cause: impl ToString) -> Self {
        PaymentError::WebhookVerification {
            cause: cause.to_string(),
        }
    }

    /// Generic gateway failure.
    pub fn gateway(cause: impl ToString) -> Self {
        PaymentError::Gateway {
            cause: cause.to_string(),
        }
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(ErrorCode::PaymentFailed, err.to_string())
    }
}
