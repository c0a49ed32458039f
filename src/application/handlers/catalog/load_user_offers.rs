//! LoadUserOffersHandler - assembles the effective catalog for a user.

use std::sync::Arc;

use crate::domain::catalog::{merge_offers, Offer};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{OfferFilter, OfferRepository, UserCreditsRepository};

/// Handler that computes the effective offer catalog.
///
/// Root offers come from the configured default group; override offers
/// come from the groups the user has unlocked through paid subscriptions.
/// The two sequences are merged by overriding key, overrides winning.
pub struct LoadUserOffersHandler {
    offers: Arc<dyn OfferRepository>,
    credits: Arc<dyn UserCreditsRepository>,
    default_offer_group: String,
}

impl LoadUserOffersHandler {
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        credits: Arc<dyn UserCreditsRepository>,
        default_offer_group: impl Into<String>,
    ) -> Self {
        Self {
            offers,
            credits,
            default_offer_group: default_offer_group.into(),
        }
    }

    /// Loads the catalog a user should see.
    ///
    /// A user without an entitlement record simply has no unlocked groups
    /// and sees the default catalog unchanged.
    ///
    /// # Errors
    ///
    /// Propagates store failures from either query.
    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Offer>, DomainError> {
        let purchased_groups = match self.credits.find_by_user_id(user_id).await? {
            Some(credits) => credits
                .active_subscriptions()
                .into_iter()
                .map(|sub| sub.offer_group)
                .collect(),
            None => Vec::new(),
        };

        self.handle_for_groups(&purchased_groups).await
    }

    /// Loads the catalog for an explicit set of unlocked groups.
    ///
    /// Exposed for callers that track group membership outside the
    /// entitlement store.
    pub async fn handle_for_groups(
        &self,
        purchased_groups: &[String],
    ) -> Result<Vec<Offer>, DomainError> {
        let root_offers = self
            .offers
            .load_offers(&OfferFilter::group(self.default_offer_group.as_str()))
            .await?;

        let override_offers = if purchased_groups.is_empty() {
            Vec::new()
        } else {
            self.offers
                .load_offers(&OfferFilter::purchased(purchased_groups.to_vec()))
                .await?
        };

        tracing::debug!(
            roots = root_offers.len(),
            overrides = override_offers.len(),
            groups = ?purchased_groups,
            "assembling user catalog"
        );

        Ok(merge_offers(&root_offers, &override_offers))
    }
}
