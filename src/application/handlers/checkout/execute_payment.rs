//! ExecutePaymentHandler - polls the gateway and advances the order.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, Timestamp};
use crate::domain::order::{Order, OrderStatus, TransitionOutcome};
use crate::domain::payment::PaymentError;
use crate::ports::{
    OfferRepository, OrderRepository, PaymentGateway, TokenLedger, UserCreditsRepository,
};

use super::settlement::EntitlementSettlement;
use super::CheckoutError;

/// Handler for the polling channel of the payment state machine.
///
/// Retrieves the current intent status from the gateway and feeds it to
/// the order's transition function; webhook ingestion drives the exact
/// same function, so the two channels cannot diverge.
///
/// Concurrent calls for the same order are safe only to the extent the
/// store serializes writes to that order document; this handler provides
/// no mutual exclusion of its own.
pub struct ExecutePaymentHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
    settlement: EntitlementSettlement,
}

impl ExecutePaymentHandler {
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

    /// Polls the order's current intent and applies the observed status.
    ///
    /// # Errors
    ///
    /// - `PaymentError::NoIntent` if no intent was created for the order;
    ///   the order is not mutated. The caller recovers by minting a new
    ///   intent (abandoned-checkout policy).
    /// - `CheckoutError::Payment` if the gateway retrieval fails
    /// - `OrderNotFound` if the order id is unknown
    pub async fn handle(&self, order_id: OrderId) -> Result<Order, CheckoutError> {
        let mut order = self
            .orders
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::OrderNotFound,
                    format!("Order {} not found", order_id),
                )
            })?;

        let intent_id = order
            .payment_intent_id
            .clone()
            .ok_or(PaymentError::NoIntent)?;

        let status = self.gateway.retrieve_intent(&intent_id).await?;
        let now = Timestamp::now();

        match order.apply_intent_status(&status, Some(now))? {
            TransitionOutcome::Noop => {
                tracing::debug!(order_id = %order.id, ?status, "intent status observed, no-op");
            }
            TransitionOutcome::Applied(new_status) => {
                // Entitlements are granted before the Paid status is stored:
                // if settlement fails, the stored order keeps its prior
                // status and the next observation re-runs both steps.
                if new_status == OrderStatus::Paid {
                    self.settlement.settle(&order, now).await?;
                }
                tracing::info!(order_id = %order.id, ?new_status, "order status advanced");
                self.orders.update(&order).await?;
            }
        }

        Ok(order)
    }
}
