//! IngestWebhookHandler - verifies gateway events and advances orders.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::order::{Order, OrderStatus, TransitionOutcome};
use crate::ports::{
    OfferRepository, OrderRepository, PaymentGateway, TokenLedger, UserCreditsRepository,
};

use super::settlement::EntitlementSettlement;
use super::CheckoutError;

/// Handler for the push channel of the payment state machine.
///
/// Verification is fail-closed: an event with an invalid signature or a
/// stale timestamp is rejected before any lookup happens, so unverified
/// payloads never touch stored orders. Verified events feed the same
/// transition function as polling, stamped with the event's own creation
/// time rather than arrival time.
pub struct IngestWebhookHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
    settlement: EntitlementSettlement,
}

impl IngestWebhookHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        offers: Arc<dyn OfferRepository>,
        credits: Arc<dyn UserCreditsRepository>,
        ledger: Arc<dyn TokenLedger>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            orders,
            gateway,
            settlement: EntitlementSettlement::new(offers, credits, ledger),
        }
    }

    /// Verifies a raw webhook delivery and applies the observed status.
    ///
    /// Redelivered events for an already settled order are acknowledged
    /// as no-ops, so gateway retries stay safe.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::Payment` if the signature or timestamp check fails
    /// - `OrderNotFound` if no order references the event's intent
    pub async fn handle(
        &self,
        raw_body: &[u8],
        signature_header: &str,
    ) -> Result<Order, CheckoutError> {
        let observed = self.gateway.verify_webhook(raw_body, signature_header)?;

        let mut order = self
            .orders
            .find_by_intent_id(&observed.intent_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::OrderNotFound,
                    format!("No order found for intent {}", observed.intent_id),
                )
            })?;

        match order.apply_intent_status(&observed.status, Some(observed.observed_at))? {
            TransitionOutcome::Noop => {
                tracing::debug!(
                    order_id = %order.id,
                    intent_id = %observed.intent_id,
                    "webhook event ignored, no-op"
                );
            }
            TransitionOutcome::Applied(new_status) => {
                tracing::info!(
                    order_id = %order.id,
                    intent_id = %observed.intent_id,
                    ?new_status,
                    "webhook event advanced order"
                );
                // Same ordering as the polling channel: grant entitlements
                // first so a failed settlement leaves the stored order
                // unadvanced and the redelivered event retries both steps.
                if new_status == OrderStatus::Paid {
                    self.settlement.settle(&order, observed.observed_at).await?;
                }
                self.orders.update(&order).await?;
            }
        }

        Ok(order)
    }
}
