//! UserCredits aggregate: a user's entitlement record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::{Subscription, SubscriptionStatus};

/// A user's entitlement record: running token balance plus subscription
/// entries. Created at the user's first settled purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCredits {
    /// Owner of the record.
    pub user_id: UserId,

    /// Running token balance, kept in sync with the ledger.
    pub tokens: i64,

    /// Subscription entries, in activation order.
    pub subscriptions: Vec<Subscription>,
}

impl UserCredits {
    /// Creates an empty record for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            tokens: 0,
            subscriptions: Vec::new(),
        }
    }

    /// Returns the paid subscriptions, preserving original order.
    pub fn active_subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions
            .iter()
            .filter(|sub| sub.status == SubscriptionStatus::Paid)
            .cloned()
            .collect()
    }

    /// Appends a subscription entry.
    pub fn grant_subscription(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Adjusts the running token balance by a signed delta.
    pub fn credit_tokens(&mut self, delta: i64) {
        self.tokens += delta;
    }
}
