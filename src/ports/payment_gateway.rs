//! Payment gateway port.
//!
//! Contract for the external payment provider: intent creation, status
//! retrieval, and webhook verification. Implementations must provide
//! idempotency per intent id; the core performs no retries and surfaces
//! every failure as a typed [`PaymentError`]. Callers own timeouts.

use async_trait::async_trait;

use crate::domain::payment::{IntentHandle, IntentStatus, IntentStatusObserved, PaymentError};

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for an amount in minor currency units.
    ///
    /// Returns the intent id and the client secret the buyer needs to
    /// complete a client-side confirmation step. The secret must never be
    /// persisted by the caller.
    async fn create_intent(
        &self,
        amount_minor_units: i64,
        currency: &str,
        description: &str,
    ) -> Result<IntentHandle, PaymentError>;

    /// Retrieve the current status of an intent.
    async fn retrieve_intent(&self, intent_id: &str) -> Result<IntentStatus, PaymentError>;

    /// Verify an inbound webhook payload and convert it into a
    /// provider-neutral observation.
    ///
    /// Verification is local (HMAC over the raw body) and fails closed:
    /// any signature mismatch, stale timestamp, or unparseable payload is
    /// a `PaymentError::WebhookVerification`.
    fn verify_webhook(
        &self,
        raw_body: &[u8],
        signature_header: &str,
    ) -> Result<IntentStatusObserved, PaymentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }
}
