//! Entitlement settlement for orders that reached Paid.
//!
//! Shared by the polling and webhook handlers so both channels grant the
//! exact same entitlements. Duplicate deliveries never reach this code:
//! the order aggregate reports a no-op for observations on an already-paid
//! order.

use std::sync::Arc;

use crate::domain::catalog::OfferKind;
use crate::domain::credits::{Subscription, TokenTimetableEntry, UserCredits};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::order::Order;
use crate::ports::{OfferRepository, TokenLedger, UserCreditsRepository};

/// Grants the entitlements a settled order purchased.
pub(super) struct EntitlementSettlement {
    offers: Arc<dyn OfferRepository>,
    credits: Arc<dyn UserCreditsRepository>,
    ledger: Arc<dyn TokenLedger>,
}

impl EntitlementSettlement {
    pub(super) fn new(
        offers: Arc<dyn OfferRepository>,
        credits: Arc<dyn UserCreditsRepository>,
        ledger: Arc<dyn TokenLedger>,
    ) -> Self {
        Self {
            offers,
            credits,
            ledger,
        }
    }

    /// Settles a freshly paid order.
    ///
    /// Subscription-kind offers append an activated subscription to the
    /// user's record; token-kind offers write one ledger entry and bump
    /// the running balance. A first settled purchase creates the record.
    pub(super) async fn settle(&self, order: &Order, at: Timestamp) -> Result<(), DomainError> {
        let offer = self
            .offers
            .find_by_id(&order.offer_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::OfferNotFound,
                    format!("Offer {} not found for settlement", order.offer_id),
                )
            })?;

        let mut credits = self
            .credits
            .find_by_user_id(&order.user_id)
            .await?
            .unwrap_or_else(|| UserCredits::new(order.user_id.clone()));

        match offer.kind {
            OfferKind::Subscription => {
                let subscription = Subscription::activated(&offer, order, at);
                tracing::info!(
                    order_id = %order.id,
                    user_id = %order.user_id,
                    offer_group = %offer.offer_group,
                    expires = %subscription.expires.as_datetime(),
                    "subscription activated"
                );
                credits.grant_subscription(subscription);
            }
            OfferKind::Tokens => {
                let delta = offer.token_count.unwrap_or(0) * order.quantity as i64;
                self.ledger
                    .append(&TokenTimetableEntry {
                        user_id: order.user_id.clone(),
                        tokens: delta,
                        created_at: at,
                    })
                    .await?;
                credits.credit_tokens(delta);
                tracing::info!(
                    order_id = %order.id,
                    user_id = %order.user_id,
                    tokens = delta,
                    "tokens credited"
                );
            }
        }

        self.credits.save(&credits).await
    }
}
