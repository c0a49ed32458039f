//! Order aggregate entity.
//!
//! An order tracks one purchase attempt of an offer through the payment
//! lifecycle. Both status polling and webhook ingestion funnel into
//! [`Order::apply_intent_status`], the single transition function, so the
//! two delivery channels cannot diverge.
//!
//! # Design Decisions
//!
//! - **Money in minor units**: `total` and prices are i64 cents
//! - **Replaceable intent**: `payment_intent_id` identifies the *current*
//!   charge attempt and may be replaced while the order is not yet Paid.
//!   A client can abandon a checkout and the client secret cannot be
//!   persisted or re-derived, so the caller mints a fresh intent instead.
//! - **Transient secret**: `payment_intent_secret` carries `#[serde(skip)]`;
//!   any store that serializes the aggregate never sees it

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Offer, OfferCycle};
use crate::domain::foundation::{
    DomainError, ErrorCode, OfferId, OrderId, StateMachine, Timestamp, UserId,
};
use crate::domain::payment::IntentStatus;

use super::OrderStatus;

/// One entry in an order's audit history.
///
/// History is append-only, ordered by insertion, never reordered or pruned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: Timestamp,
    pub message: String,
    pub status: OrderStatus,
}

/// Outcome of feeding an observed intent status to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The order moved to a new status and one history entry was appended.
    Applied(OrderStatus),
    /// The observation required no change (unmapped status, duplicate
    /// delivery, or the order is already settled).
    Noop,
}

/// Order aggregate: one purchase of an offer by a user.
///
/// # Invariants
///
/// - `status` reaches `Paid` at most once; `Paid` is terminal
/// - once `Paid`, intent fields are immutable
/// - every effective transition appends exactly one history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier for this order.
    pub id: OrderId,

    /// User making the purchase.
    pub user_id: UserId,

    /// Offer being purchased.
    pub offer_id: OfferId,

    /// Offer group at purchase time (denormalized from the offer).
    pub offer_group: String,

    /// Billing cycle at purchase time.
    pub cycle: OfferCycle,

    /// Custom cycle day count, when `cycle` is custom.
    pub custom_cycle: Option<u32>,

    /// Units purchased.
    pub quantity: u32,

    /// Amount due in minor currency units.
    pub total: i64,

    /// ISO 4217 currency code.
    pub currency: String,

    /// Applicable tax rate, if known.
    pub tax_rate: Option<f64>,

    /// Buyer country, if known.
    pub country: Option<String>,

    /// Tokens granted per unit, for token-kind offers.
    pub token_count: Option<i64>,

    /// Current lifecycle status.
    pub status: OrderStatus,

    /// Append-only audit trail of status transitions.
    pub history: Vec<HistoryEntry>,

    /// Gateway id of the current charge attempt. Replaceable until Paid.
    pub payment_intent_id: Option<String>,

    /// Client secret of the current attempt. Process memory only — never
    /// serialized, never persisted.
    #[serde(skip)]
    pub payment_intent_secret: Option<String>,

    /// When the order was created.
    pub created_at: Timestamp,

    /// When the order was last updated.
    pub updated_at: Timestamp,
}

impl Order {
    /// Creates a pending order for `quantity` units of `offer`.
    ///
    /// `total` is the amount due in minor units; tax and currency come from
    /// the caller since conversion and tax computation are out of scope.
    pub fn create(
        id: OrderId,
        user_id: UserId,
        offer: &Offer,
        quantity: u32,
        total: i64,
        currency: impl Into<String>,
        tax_rate: Option<f64>,
        country: Option<String>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            user_id,
            offer_id: offer.id,
            offer_group: offer.offer_group.clone(),
            cycle: offer.cycle,
            custom_cycle: offer.custom_cycle,
            quantity,
            total,
            currency: currency.into(),
            tax_rate,
            country,
            token_count: offer.token_count,
            status: OrderStatus::Pending,
            history: Vec::new(),
            payment_intent_id: None,
            payment_intent_secret: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a freshly minted payment intent on this order.
    ///
    /// Replaces any previous intent: abandoned checkouts are recovered by
    /// minting a new intent, which is intentional for any order not yet
    /// Paid.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if the order is already Paid — intent
    /// fields are immutable after settlement.
    pub fn record_intent(
        &mut self,
        intent_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<(), DomainError> {
        if self.status == OrderStatus::Paid {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Intent fields are immutable once the order is paid",
            ));
        }

        self.payment_intent_id = Some(intent_id.into());
        self.payment_intent_secret = Some(client_secret.into());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Applies an observed intent status to this order.
    ///
    /// The single transition function shared by status polling and webhook
    /// ingestion:
    ///
    /// - `Succeeded` → Paid, history "Payment succeeded"
    /// - `RequiresPaymentMethod` → Refused, history "Payment method issues"
    /// - `RequiresAction(a)` → Error, history naming the unhandled action
    /// - `Other(_)` → no-op, no history
    ///
    /// A Paid order ignores further observations (duplicate or late
    /// deliveries are Noop, not errors). Status and history mutate
    /// together or not at all.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if the mapped target is not reachable from
    /// the current status; the order is left unmodified in that case.
    pub fn apply_intent_status(
        &mut self,
        status: &IntentStatus,
        at: Option<Timestamp>,
    ) -> Result<TransitionOutcome, DomainError> {
        let (target, message) = match status {
            IntentStatus::Succeeded => (OrderStatus::Paid, "Payment succeeded".to_string()),
            IntentStatus::RequiresPaymentMethod => {
                (OrderStatus::Refused, "Payment method issues".to_string())
            }
            IntentStatus::RequiresAction(action) => (
                OrderStatus::Error,
                format!("Payment requires an action we don't handle: {}", action),
            ),
            IntentStatus::Other(_) => return Ok(TransitionOutcome::Noop),
        };

        // Paid is terminal: late or duplicate observations are ignored.
        if self.status == OrderStatus::Paid || self.status == target {
            return Ok(TransitionOutcome::Noop);
        }

        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition order from {:?} to {:?}",
                    self.status, target
                ),
            )
        })?;

        self.push_history(message, target, at);
        self.updated_at = at.unwrap_or_else(Timestamp::now);
        Ok(TransitionOutcome::Applied(target))
    }

    fn push_history(&mut self, message: String, status: OrderStatus, at: Option<Timestamp>) {
        self.history.push(HistoryEntry {
            date: at.unwrap_or_else(Timestamp::now),
            message,
            status,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::OfferKind;

    fn token_offer() -> Offer {
        Offer {
            id: OfferId::new(),
            name: "100 tokens for 100$".to_string(),
            cycle: OfferCycle::Once,
            custom_cycle: None,
            kind: OfferKind::Tokens,
            offer_group: "standard".to_string(),
            overriding_key: "100tokens".to_string(),
            parent_offer_id: None,
            has_sub_offers: false,
            price: 10000,
            token_count: Some(100),
            tags: vec![],
            quantity_limit: None,
        }
    }

    fn pending_order() -> Order {
        Order::create(
            OrderId::new(),
            UserId::new("user-123").unwrap(),
            &token_offer(),
            1,
            10000,
            "usd",
            None,
            None,
        )
    }

    #[test]
    fn create_starts_pending_with_no_intent() {
        let order = pending_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.payment_intent_id.is_none());
        assert!(order.payment_intent_secret.is_none());
        assert!(order.history.is_empty());
        assert_eq!(order.token_count, Some(100));
    }

    #[test]
    fn record_intent_stores_id_and_secret() {
        let mut order = pending_order();
        order.record_intent("pi_1", "sec_1").unwrap();

        assert_eq!(order.payment_intent_id.as_deref(), Some("pi_1"));
        assert_eq!(order.payment_intent_secret.as_deref(), Some("sec_1"));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn record_intent_replaces_abandoned_intent() {
        let mut order = pending_order();
        order.record_intent("pi_1", "sec_1").unwrap();
        order.record_intent("pi_2", "sec_2").unwrap();

        assert_eq!(order.payment_intent_id.as_deref(), Some("pi_2"));
        assert_eq!(order.payment_intent_secret.as_deref(), Some("sec_2"));
    }

    #[test]
    fn record_intent_fails_once_paid() {
        let mut order = pending_order();
        order.record_intent("pi_1", "sec_1").unwrap();
        order
            .apply_intent_status(&IntentStatus::Succeeded, None)
            .unwrap();

        let result = order.record_intent("pi_2", "sec_2");
        assert!(result.is_err());
        assert_eq!(order.payment_intent_id.as_deref(), Some("pi_1"));
    }

    #[test]
    fn succeeded_sets_paid_and_appends_one_entry() {
        let mut order = pending_order();
        let outcome = order
            .apply_intent_status(&IntentStatus::Succeeded, None)
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Applied(OrderStatus::Paid));
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.history.len(), 1);
        assert_eq!(order.history[0].status, OrderStatus::Paid);
        assert_eq!(order.history[0].message, "Payment succeeded");
    }

    #[test]
    fn requires_payment_method_sets_refused() {
        let mut order = pending_order();
        order
            .apply_intent_status(&IntentStatus::RequiresPaymentMethod, None)
            .unwrap();

        assert_eq!(order.status, OrderStatus::Refused);
        assert_eq!(order.history.len(), 1);
        assert_eq!(order.history[0].message, "Payment method issues");
    }

    #[test]
    fn requires_action_sets_error_and_names_action() {
        let mut order = pending_order();
        order
            .apply_intent_status(
                &IntentStatus::RequiresAction("redirect_to_url".to_string()),
                None,
            )
            .unwrap();

        assert_eq!(order.status, OrderStatus::Error);
        assert!(order.history[0].message.contains("redirect_to_url"));
    }

    #[test]
    fn unmapped_status_is_noop() {
        let mut order = pending_order();
        let outcome = order
            .apply_intent_status(&IntentStatus::Other("processing".to_string()), None)
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Noop);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.history.is_empty());
    }

    #[test]
    fn duplicate_delivery_is_noop_not_double_append() {
        let mut order = pending_order();
        order
            .apply_intent_status(&IntentStatus::Succeeded, None)
            .unwrap();
        let outcome = order
            .apply_intent_status(&IntentStatus::Succeeded, None)
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Noop);
        assert_eq!(order.history.len(), 1);
    }

    #[test]
    fn paid_ignores_late_refusal() {
        let mut order = pending_order();
        order
            .apply_intent_status(&IntentStatus::Succeeded, None)
            .unwrap();
        let outcome = order
            .apply_intent_status(&IntentStatus::RequiresPaymentMethod, None)
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Noop);
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.history.len(), 1);
    }

    #[test]
    fn refused_order_can_settle_later() {
        let mut order = pending_order();
        order
            .apply_intent_status(&IntentStatus::RequiresPaymentMethod, None)
            .unwrap();
        order
            .apply_intent_status(&IntentStatus::Succeeded, None)
            .unwrap();

        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.history.len(), 2);
        assert_eq!(order.history[1].status, OrderStatus::Paid);
    }

    #[test]
    fn supplied_timestamp_is_used_for_history() {
        let mut order = pending_order();
        let at = Timestamp::from_unix_secs(1705276800);
        order
            .apply_intent_status(&IntentStatus::Succeeded, Some(at))
            .unwrap();

        assert_eq!(order.history[0].date, at);
        assert_eq!(order.updated_at, at);
    }

    #[test]
    fn secret_is_never_serialized() {
        let mut order = pending_order();
        order.record_intent("pi_1", "sec_1").unwrap();

        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("pi_1"));
        assert!(!json.contains("sec_1"));
    }
}
