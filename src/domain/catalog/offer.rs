//! Offer entity and its value objects.
//!
//! An offer is a purchasable catalog entry: a subscription tier or a one-off
//! token bundle. Offers are created by catalog administration and are
//! read-only to this crate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::OfferId;

/// Billing cycle of an offer.
///
/// Determines how long a subscription entitlement lasts per unit of quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OfferCycle {
    /// One-shot purchase, no recurring period.
    Once,
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Trimester,
    Semester,
    Yearly,
    /// Period length comes from the offer's `custom_cycle` day count.
    Custom,
}

impl OfferCycle {
    /// Entitlement period in days for one unit of quantity.
    ///
    /// Returns `None` for `Once` (no recurring period) and for `Custom`
    /// when no day count was configured on the offer.
    pub fn period_days(&self, custom_cycle: Option<u32>) -> Option<i64> {
        match self {
            OfferCycle::Once => None,
            OfferCycle::Daily => Some(1),
            OfferCycle::Weekly => Some(7),
            OfferCycle::BiWeekly => Some(14),
            OfferCycle::Monthly => Some(30),
            OfferCycle::Trimester => Some(90),
            OfferCycle::Semester => Some(182),
            OfferCycle::Yearly => Some(365),
            OfferCycle::Custom => custom_cycle.map(|d| d as i64),
        }
    }
}

/// What a settled purchase of the offer grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    /// A one-off bundle of consumable tokens.
    Tokens,
    /// A time-boxed subscription entitlement.
    Subscription,
}

/// A purchasable catalog entry.
///
/// # Invariants
///
/// - `overriding_key` identifies commercial equivalence across offer groups:
///   two offers with the same key in different groups are the same product
///   tier, and the group-scoped one supersedes the root one at resolution.
/// - `has_sub_offers == true` implies at least one other offer references
///   this one as `parent_offer_id`. Advisory only; the resolver does not
///   enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Unique identifier for this offer.
    pub id: OfferId,

    /// Display name.
    pub name: String,

    /// Billing cycle.
    pub cycle: OfferCycle,

    /// Period length in days when `cycle` is `Custom`.
    pub custom_cycle: Option<u32>,

    /// Whether the offer grants tokens or a subscription.
    pub kind: OfferKind,

    /// Catalog partition this offer belongs to (e.g. "standard", "VIP").
    pub offer_group: String,

    /// Commercial-equivalence key used at resolution time.
    pub overriding_key: String,

    /// Parent offer this one is scoped under, if it is a sub-offer.
    /// Weak reference: identifies scope, not ownership.
    pub parent_offer_id: Option<OfferId>,

    /// Whether other offers reference this one as a parent.
    pub has_sub_offers: bool,

    /// Price in minor currency units (cents).
    pub price: i64,

    /// Tokens granted per unit of quantity, for token-kind offers.
    pub token_count: Option<i64>,

    /// Free-form tags used by catalog queries.
    pub tags: Vec<String>,

    /// Maximum purchasable quantity, if limited.
    pub quantity_limit: Option<u32>,
}

impl Offer {
    /// Entitlement period in days for one unit of quantity.
    pub fn period_days(&self) -> Option<i64> {
        self.cycle.period_days(self.custom_cycle)
    }
}
