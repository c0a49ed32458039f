//! In-memory entitlement store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::catalog::Offer;
use crate::domain::credits::{TokenTimetableEntry, UserCredits};
use crate::domain::foundation::{DomainError, ErrorCode, OfferId, OrderId, UserId};
use crate::domain::order::Order;
use crate::ports::{
    OfferFilter, OfferRepository, OrderRepository, TokenLedger, UserCreditsRepository,
};

/// One struct implementing every store port, backed by mutex-guarded maps.
#[derive(Default)]
pub struct MemoryStore {
    offers: Mutex<HashMap<OfferId, Offer>>,
    orders: Mutex<HashMap<OrderId, Order>>,
    credits: Mutex<HashMap<UserId, UserCredits>>,
    ledger: Mutex<Vec<TokenTimetableEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(offer: &Offer, filter: &OfferFilter) -> bool {
    if let Some(group) = &filter.offer_group {
        if &offer.offer_group != group {
            return false;
        }
    }
    if !filter.purchased_groups.is_empty()
        && !filter.purchased_groups.contains(&offer.offer_group)
    {
        return false;
    }
    if !filter.tags.is_empty() {
        let has = |tag: &String| offer.tags.contains(tag);
        let ok = if filter.all_tags {
            filter.tags.iter().all(has)
        } else {
            filter.tags.iter().any(has)
        };
        if !ok {
            return false;
        }
    }
    true
}

#[async_trait]
impl OfferRepository for MemoryStore {
    async fn find_by_id(&self, id: &OfferId) -> Result<Option<Offer>, DomainError> {
        Ok(self.offers.lock().unwrap().get(id).cloned())
    }

    async fn create(&self, offer: &Offer) -> Result<(), DomainError> {
        self.offers.lock().unwrap().insert(offer.id, offer.clone());
        Ok(())
    }

    async fn load_offers(&self, filter: &OfferFilter) -> Result<Vec<Offer>, DomainError> {
        Ok(self
            .offers
            .lock()
            .unwrap()
            .values()
            .filter(|offer| matches_filter(offer, filter))
            .cloned()
            .collect())
    }

    async fn load_sub_group_offers(
        &self,
        parent_offer_id: &OfferId,
    ) -> Result<Vec<Offer>, DomainError> {
        Ok(self
            .offers
            .lock()
            .unwrap()
            .values()
            .filter(|offer| offer.parent_offer_id.as_ref() == Some(parent_offer_id))
            .cloned()
            .collect())
    }

    async fn load_tagged_offers(&self, tags: &[String]) -> Result<Vec<Offer>, DomainError> {
        Ok(self
            .offers
            .lock()
            .unwrap()
            .values()
            .filter(|offer| tags.iter().all(|tag| offer.tags.contains(tag)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.lock().unwrap().get(id).cloned())
    }

    async fn find_by_intent_id(&self, intent_id: &str) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .values()
            .find(|order| order.payment_intent_id.as_deref() == Some(intent_id))
            .cloned())
    }

    async fn create(&self, order: &Order) -> Result<(), DomainError> {
        // Mirror a store that serializes the aggregate: the transient
        // client secret never survives the write path.
        let mut persisted = order.clone();
        persisted.payment_intent_secret = None;
        self.orders.lock().unwrap().insert(order.id, persisted);
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap();
        if !orders.contains_key(&order.id) {
            return Err(DomainError::new(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", order.id),
            ));
        }
        let mut persisted = order.clone();
        persisted.payment_intent_secret = None;
        orders.insert(order.id, persisted);
        Ok(())
    }
}

#[async_trait]
impl UserCreditsRepository for MemoryStore {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<UserCredits>, DomainError> {
        Ok(self.credits.lock().unwrap().get(user_id).cloned())
    }

    async fn save(&self, credits: &UserCredits) -> Result<(), DomainError> {
        self.credits
            .lock()
            .unwrap()
            .insert(credits.user_id.clone(), credits.clone());
        Ok(())
    }
}

#[async_trait]
impl TokenLedger for MemoryStore {
    async fn append(&self, entry: &TokenTimetableEntry) -> Result<(), DomainError> {
        self.ledger.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn entries_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TokenTimetableEntry>, DomainError> {
        Ok(self
            .ledger
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| &entry.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{OfferCycle, OfferKind};

    fn offer(group: &str, key: &str, tags: &[&str]) -> Offer {
        Offer {
            id: OfferId::new(),
            name: key.to_string(),
            cycle: OfferCycle::Monthly,
            custom_cycle: None,
            kind: OfferKind::Subscription,
            offer_group: group.to_string(),
            overriding_key: key.to_string(),
            parent_offer_id: None,
            has_sub_offers: false,
            price: 4900,
            token_count: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            quantity_limit: None,
        }
    }

    #[tokio::test]
    async fn create_then_find_offer() {
        let store = MemoryStore::new();
        let offer = offer("standard", "startup", &[]);
        OfferRepository::create(&store, &offer).await.unwrap();

        let found = OfferRepository::find_by_id(&store, &offer.id).await.unwrap();
        assert_eq!(found, Some(offer));
    }

    #[tokio::test]
    async fn load_offers_filters_by_group() {
        let store = MemoryStore::new();
        OfferRepository::create(&store, &offer("standard", "a", &[])).await.unwrap();
        OfferRepository::create(&store, &offer("VIP", "b", &[])).await.unwrap();

        let standard = store
            .load_offers(&OfferFilter::group("standard"))
            .await
            .unwrap();
        assert_eq!(standard.len(), 1);
        assert_eq!(standard[0].offer_group, "standard");
    }

    #[tokio::test]
    async fn load_offers_filters_by_purchased_groups() {
        let store = MemoryStore::new();
        OfferRepository::create(&store, &offer("standard", "a", &[])).await.unwrap();
        OfferRepository::create(&store, &offer("VIP", "b", &[])).await.unwrap();
        OfferRepository::create(&store, &offer("EarlyBird", "c", &[])).await.unwrap();

        let overrides = store
            .load_offers(&OfferFilter::purchased(vec![
                "VIP".to_string(),
                "EarlyBird".to_string(),
            ]))
            .await
            .unwrap();
        assert_eq!(overrides.len(), 2);
    }

    #[tokio::test]
    async fn load_tagged_offers_requires_all_tags() {
        let store = MemoryStore::new();
        OfferRepository::create(&store, &offer("VIP", "a", &["exclusive", "vip"]))
            .await
            .unwrap();
        OfferRepository::create(&store, &offer("VIP", "b", &["exclusive"]))
            .await
            .unwrap();

        let tagged = store
            .load_tagged_offers(&["exclusive".to_string(), "vip".to_string()])
            .await
            .unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].overriding_key, "a");
    }

    #[tokio::test]
    async fn sub_group_offers_match_parent() {
        let store = MemoryStore::new();
        let parent = offer("standard", "enterprise", &[]);
        let mut child = offer("VIP", "1vip", &[]);
        child.parent_offer_id = Some(parent.id);
        OfferRepository::create(&store, &parent).await.unwrap();
        OfferRepository::create(&store, &child).await.unwrap();

        let children = store.load_sub_group_offers(&parent.id).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].overriding_key, "1vip");
    }

    #[tokio::test]
    async fn order_write_path_drops_secret() {
        let store = MemoryStore::new();
        let catalog_offer = offer("standard", "startup", &[]);
        let mut order = Order::create(
            OrderId::new(),
            UserId::new("user-1").unwrap(),
            &catalog_offer,
            1,
            4900,
            "usd",
            None,
            None,
        );
        order.record_intent("pi_1", "sec_1").unwrap();
        OrderRepository::create(&store, &order).await.unwrap();

        let stored = OrderRepository::find_by_id(&store, &order.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.payment_intent_id.as_deref(), Some("pi_1"));
        assert!(stored.payment_intent_secret.is_none());
    }

    #[tokio::test]
    async fn find_by_intent_id_matches_current_intent_only() {
        let store = MemoryStore::new();
        let catalog_offer = offer("standard", "startup", &[]);
        let mut order = Order::create(
            OrderId::new(),
            UserId::new("user-1").unwrap(),
            &catalog_offer,
            1,
            4900,
            "usd",
            None,
            None,
        );
        order.record_intent("pi_old", "sec_old").unwrap();
        OrderRepository::create(&store, &order).await.unwrap();

        order.record_intent("pi_new", "sec_new").unwrap();
        store.update(&order).await.unwrap();

        assert!(store.find_by_intent_id("pi_old").await.unwrap().is_none());
        assert!(store.find_by_intent_id("pi_new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn update_unknown_order_fails() {
        let store = MemoryStore::new();
        let catalog_offer = offer("standard", "startup", &[]);
        let order = Order::create(
            OrderId::new(),
            UserId::new("user-1").unwrap(),
            &catalog_offer,
            1,
            4900,
            "usd",
            None,
            None,
        );

        let result = store.update(&order).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn ledger_appends_in_order() {
        let store = MemoryStore::new();
        let user = UserId::new("user-1").unwrap();
        store
            .append(&TokenTimetableEntry::new(user.clone(), 100))
            .await
            .unwrap();
        store
            .append(&TokenTimetableEntry::new(user.clone(), -20))
            .await
            .unwrap();

        let entries = store.entries_for_user(&user).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].tokens, 100);
        assert_eq!(entries[1].tokens, -20);
    }
}
