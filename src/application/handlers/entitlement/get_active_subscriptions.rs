//! GetActiveSubscriptionsHandler - single-read subscription lookup.

use std::sync::Arc;

use crate::domain::credits::Subscription;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::UserCreditsRepository;

/// Handler returning a user's paid subscriptions.
///
/// One store read per call. A missing entitlement record is an error,
/// not an empty list: callers that reach this query expect the user to
/// have purchased something, and a silent empty answer would mask data
/// loss.
pub struct GetActiveSubscriptionsHandler {
    credits: Arc<dyn UserCreditsRepository>,
}

impl GetActiveSubscriptionsHandler {
    pub fn new(credits: Arc<dyn UserCreditsRepository>) -> Self {
        Self { credits }
    }

    /// Returns the user's paid subscriptions in their stored order.
    ///
    /// # Errors
    ///
    /// - `UserCreditsNotFound` if the user has no entitlement record
    /// - store failures are propagated unchanged
    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let credits = self
            .credits
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UserCreditsNotFound,
                    format!("No entitlement record for user {}", user_id.as_str()),
                )
            })?;

        Ok(credits.active_subscriptions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::credits::{SubscriptionStatus, UserCredits};
    use crate::domain::foundation::{OfferId, Timestamp};

    fn subscription(group: &str, status: SubscriptionStatus) -> Subscription {
        Subscription {
            offer_id: OfferId::new(),
            offer_group: group.to_string(),
            starts: Timestamp::now(),
            expires: Timestamp::now().add_days(30),
            status,
        }
    }

    #[tokio::test]
    async fn returns_only_paid_subscriptions_in_stored_order() {
        let store = Arc::new(MemoryStore::new());
        let user = UserId::new("user-1").unwrap();

        let mut credits = UserCredits::new(user.clone());
        credits.grant_subscription(subscription("VIP", SubscriptionStatus::Paid));
        credits.grant_subscription(subscription("standard", SubscriptionStatus::Pending));
        credits.grant_subscription(subscription("EarlyBird", SubscriptionStatus::Paid));
        credits.grant_subscription(subscription("standard", SubscriptionStatus::Refused));
        store.save(&credits).await.unwrap();

        let handler = GetActiveSubscriptionsHandler::new(store);
        let active = handler.handle(&user).await.unwrap();

        assert_eq!(active.len(), 2);
        assert_eq!(active[0].offer_group, "VIP");
        assert_eq!(active[1].offer_group, "EarlyBird");
    }

    #[tokio::test]
    async fn missing_record_is_an_error_not_an_empty_list() {
        let store = Arc::new(MemoryStore::new());
        let handler = GetActiveSubscriptionsHandler::new(store);

        let user = UserId::new("ghost").unwrap();
        let err = handler.handle(&user).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::UserCreditsNotFound);
        assert!(err.message.contains("ghost"));
    }

    #[tokio::test]
    async fn record_with_no_paid_subscriptions_yields_empty_list() {
        let store = Arc::new(MemoryStore::new());
        let user = UserId::new("user-1").unwrap();

        let mut credits = UserCredits::new(user.clone());
        credits.grant_subscription(subscription("VIP", SubscriptionStatus::Pending));
        store.save(&credits).await.unwrap();

        let handler = GetActiveSubscriptionsHandler::new(store);
        let active = handler.handle(&user).await.unwrap();
        assert!(active.is_empty());
    }
}
