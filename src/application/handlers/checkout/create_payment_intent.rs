//! CreatePaymentIntentHandler - mints a payment intent for a pending order.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, Timestamp};
use crate::domain::order::Order;
use crate::ports::{OrderRepository, PaymentGateway};

use super::CheckoutError;

/// Handler for minting a payment intent on an order.
///
/// Also the recovery path for abandoned checkouts: the client secret lives
/// only in process memory and cannot be re-derived, so calling this again
/// replaces the order's intent with a fresh one (allowed until the order is
/// Paid).
///
/// The order is left untouched if the gateway call fails, so a retry with a
/// fresh attempt is always safe.
pub struct CreatePaymentIntentHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CreatePaymentIntentHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { orders, gateway }
    }

    /// Mints an intent for the order's total and records it.
    ///
    /// Returns the updated order carrying the intent id and the transient
    /// client secret. The order's `status` never changes here.
    ///
    /// # Errors
    ///
    /// - `CheckoutError::Payment` if the gateway call fails
    /// - `OrderNotFound` if the order id is unknown
    /// - `InvalidStateTransition` if the order is already Paid
    pub async fn handle(&self, order_id: OrderId) -> Result<Order, CheckoutError> {
        let mut order = self
            .orders
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| not_found(&order_id))?;

        let description = format!(
            "Payment for order {} created {}",
            order.id,
            Timestamp::now().as_datetime().format("%Y-%m-%d")
        );

        let handle = self
            .gateway
            .create_intent(order.total, &order.currency, &description)
            .await?;

        tracing::debug!(order_id = %order.id, intent_id = %handle.id, "payment intent created");

        order.record_intent(handle.id, handle.client_secret)?;
        self.orders.update(&order).await?;

        Ok(order)
    }
}

fn not_found(order_id: &OrderId) -> DomainError {
    DomainError::new(
        ErrorCode::OrderNotFound,
        format!("Order {} not found", order_id),
    )
}
