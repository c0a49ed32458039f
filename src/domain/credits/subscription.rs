//! Subscription entitlement entries.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Offer;
use crate::domain::foundation::{OfferId, Timestamp};
use crate::domain::order::Order;

/// Payment status of a subscription entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Pending,
    Paid,
    Refused,
}

/// One subscription entitlement held by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Offer this subscription was purchased from.
    pub offer_id: OfferId,

    /// Offer group at purchase time.
    pub offer_group: String,

    /// When the entitlement starts.
    pub starts: Timestamp,

    /// When the entitlement ends.
    pub expires: Timestamp,

    /// Payment status.
    pub status: SubscriptionStatus,
}

impl Subscription {
    /// Builds the activated (Paid) subscription for a settled order.
    ///
    /// Expiry is the activation time plus the offer's cycle period times
    /// the purchased quantity. Cycles without a period (one-shot offers)
    /// expire immediately.
    pub fn activated(offer: &Offer, order: &Order, starts: Timestamp) -> Self {
        let days = offer.period_days().unwrap_or(0) * order.quantity as i64;
        Self {
            offer_id: offer.id,
            offer_group: offer.offer_group.clone(),
            starts,
            expires: starts.add_days(days),
            status: SubscriptionStatus::Paid,
        }
    }

    /// Whether the subscription is paid and covers the given instant.
    pub fn covers(&self, at: &Timestamp) -> bool {
        self.status == SubscriptionStatus::Paid && self.starts <= *at && *at < self.expires
    }
}
