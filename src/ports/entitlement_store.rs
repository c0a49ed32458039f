//! Entitlement store ports.
//!
//! Persistence contracts for offers, orders, user credits, and the token
//! ledger. Implementations own all concurrency control: the core relies on
//! per-document atomic updates and performs no locking of its own.

use async_trait::async_trait;

use crate::domain::catalog::Offer;
use crate::domain::credits::{TokenTimetableEntry, UserCredits};
use crate::domain::foundation::{DomainError, OfferId, OrderId, UserId};
use crate::domain::order::Order;

/// Filter for catalog queries.
///
/// All set fields must match; unset fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    /// Restrict to a single offer group.
    pub offer_group: Option<String>,

    /// Restrict to offers in any of these groups (e.g. a user's purchased
    /// groups, to load their override offers).
    pub purchased_groups: Vec<String>,

    /// Restrict to offers carrying these tags.
    pub tags: Vec<String>,

    /// When true, every tag in `tags` must be present; otherwise any one
    /// suffices.
    pub all_tags: bool,
}

impl OfferFilter {
    /// Filter for the root offers of a single group.
    pub fn group(offer_group: impl Into<String>) -> Self {
        Self {
            offer_group: Some(offer_group.into()),
            ..Self::default()
        }
    }

    /// Filter for the override offers of a set of purchased groups.
    pub fn purchased(groups: impl IntoIterator<Item = String>) -> Self {
        Self {
            purchased_groups: groups.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Repository port for catalog offers. Offers are read-mostly: catalog
/// administration creates them, the core only queries.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Find an offer by its id. Returns `None` if absent.
    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, DomainError>;

    /// Persist a new offer (catalog administration and test fixtures).
    async fn create(&self, offer: &Offer) -> Result<(), DomainError>;

    /// Load offers matching a filter.
    async fn load_offers(&self, filter: &OfferFilter) -> Result<Vec<Offer>, DomainError>;

    /// Load the sub-offers scoped under a parent offer.
    async fn load_sub_group_offers(
        &self,
        parent_offer_id: &OfferId,
    ) -> Result<Vec<Offer>, DomainError>;

    /// Load offers carrying all of the given tags.
    async fn load_tagged_offers(&self, tags: &[String]) -> Result<Vec<Offer>, DomainError>;
}

/// Repository port for orders.
///
/// `update` must replace the whole document atomically; the transient
/// client secret never reaches the write path (the aggregate skips it at
/// serialization).
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by its id. Returns `None` if absent.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Find the order whose *current* payment intent has the given id.
    ///
    /// Webhook ingestion locates orders this way. Stale intent ids (from
    /// abandoned attempts) match nothing.
    async fn find_by_intent_id(&self, intent_id: &str) -> Result<Option<Order>, DomainError>;

    /// Persist a new order.
    async fn create(&self, order: &Order) -> Result<(), DomainError>;

    /// Update an existing order.
    async fn update(&self, order: &Order) -> Result<(), DomainError>;
}

/// Repository port for user entitlement records.
#[async_trait]
pub trait UserCreditsRepository: Send + Sync {
    /// Find a user's entitlement record. Returns `None` if the user has
    /// never had a settled purchase.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<UserCredits>, DomainError>;

    /// Insert or replace the user's record.
    async fn save(&self, credits: &UserCredits) -> Result<(), DomainError>;
}

/// Append-only token ledger port.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Append one ledger entry. Entries are never mutated or deleted.
    async fn append(&self, entry: &TokenTimetableEntry) -> Result<(), DomainError>;

    /// All entries for a user, in insertion order.
    async fn entries_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TokenTimetableEntry>, DomainError>;
}
