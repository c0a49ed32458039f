//! Offer hierarchy resolution.
//!
//! Merges the root catalog with group-scoped override offers into the
//! effective catalog a user sees. An override offer whose `overriding_key`
//! matches a root offer supersedes it (the same product tier at the
//! purchased group's conditions); override offers with new keys are
//! additional exclusive tiers.

use std::collections::HashMap;

use super::Offer;

/// Resolves the effective offer catalog from root and override offers.
///
/// The result is the union of root offers whose `overriding_key` does not
/// collide with any override, plus every override offer. Ties always break
/// in favor of the override. Output order is unspecified.
///
/// Pure and total: empty inputs yield an empty result, inputs are never
/// mutated, and no error can occur.
pub fn merge_offers(root_offers: &[Offer], override_offers: &[Offer]) -> Vec<Offer> {
    let overridden: HashMap<&str, &Offer> = override_offers
        .iter()
        .map(|offer| (offer.overriding_key.as_str(), offer))
        .collect();

    let mut merged: Vec<Offer> = root_offers
        .iter()
        .filter(|offer| !overridden.contains_key(offer.overriding_key.as_str()))
        .cloned()
        .collect();

    merged.extend(override_offers.iter().cloned());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{OfferCycle, OfferKind};
    use crate::domain::foundation::OfferId;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn offer(name: &str, key: &str, group: &str, price: i64) -> Offer {
        Offer {
            id: OfferId::new(),
            name: name.to_string(),
            cycle: OfferCycle::Monthly,
            custom_cycle: None,
            kind: OfferKind::Subscription,
            offer_group: group.to_string(),
            overriding_key: key.to_string(),
            parent_offer_id: None,
            has_sub_offers: false,
            price,
            token_count: None,
            tags: vec![],
            quantity_limit: None,
        }
    }

    #[test]
    fn empty_inputs_yield_empty_result() {
        assert!(merge_offers(&[], &[]).is_empty());
    }

    #[test]
    fn roots_pass_through_without_overrides() {
        let roots = vec![offer("Startup", "startup", "standard", 4900)];
        let merged = merge_offers(&roots, &[]);
        assert_eq!(merged, roots);
    }

    #[test]
    fn overrides_pass_through_without_roots() {
        let overrides = vec![offer("1 VIP event", "1vip", "VIP", 20000)];
        let merged = merge_offers(&[], &overrides);
        assert_eq!(merged, overrides);
    }

    #[test]
    fn colliding_key_keeps_override_and_drops_root() {
        let root = offer("100 tokens", "100tokens", "standard", 10000);
        let discounted = offer("30% off on 100 tokens", "100tokens", "VIP", 7000);

        let merged = merge_offers(
            std::slice::from_ref(&root),
            std::slice::from_ref(&discounted),
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0], discounted);
    }

    #[test]
    fn disjoint_keys_yield_plain_union() {
        let root = offer("100 tokens", "100tokens", "standard", 10000);
        let exclusive = offer("20% off on 50 tokens", "50tokens", "VIP", 4000);

        let merged = merge_offers(
            std::slice::from_ref(&root),
            std::slice::from_ref(&exclusive),
        );

        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&root));
        assert!(merged.contains(&exclusive));
    }

    #[test]
    fn mixed_collision_and_new_keys() {
        let root1 = offer("100 tokens for 100$", "100tokens", "standard", 10000);
        let root2 = offer("Starter", "starter", "standard", 5000);
        let child1 = offer("20% off on 50 tokens", "50tokens", "VIP", 4000);
        let child2 = offer("30% off on 100 tokens", "100tokens", "VIP", 7000);

        let merged = merge_offers(
            &[root1.clone(), root2.clone()],
            &[child1.clone(), child2.clone()],
        );

        assert_eq!(merged.len(), 3);
        assert!(merged.contains(&root2));
        assert!(merged.contains(&child1));
        assert!(merged.contains(&child2));
        assert!(!merged.contains(&root1));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let roots = vec![offer("A", "a", "standard", 100)];
        let overrides = vec![offer("B", "a", "VIP", 50)];
        let roots_before = roots.clone();
        let overrides_before = overrides.clone();

        let _ = merge_offers(&roots, &overrides);

        assert_eq!(roots, roots_before);
        assert_eq!(overrides, overrides_before);
    }

    fn arb_offers(group: &'static str) -> impl Strategy<Value = Vec<Offer>> {
        prop::collection::vec("[a-e]{1,2}", 0..8).prop_map(move |keys| {
            keys.into_iter()
                .enumerate()
                .map(|(i, key)| offer(&format!("{}-{}", group, i), &key, group, i as i64 * 100))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn result_is_union_with_override_priority(
            roots in arb_offers("standard"),
            overrides in arb_offers("VIP"),
        ) {
            let merged = merge_offers(&roots, &overrides);
            let override_keys: HashSet<&str> =
                overrides.iter().map(|o| o.overriding_key.as_str()).collect();

            // Every override offer appears.
            for o in &overrides {
                prop_assert!(merged.contains(o));
            }
            // Every non-superseded root appears; superseded ones do not.
            for r in &roots {
                if override_keys.contains(r.overriding_key.as_str()) {
                    prop_assert!(!merged.contains(r));
                } else {
                    prop_assert!(merged.contains(r));
                }
            }
            // Nothing else appears.
            prop_assert!(merged.len() <= roots.len() + overrides.len());
            for m in &merged {
                prop_assert!(roots.contains(m) || overrides.contains(m));
            }
        }
    }
}
