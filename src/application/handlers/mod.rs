//! Command handlers, grouped by concern.
//!
//! Handlers orchestrate the store and gateway ports around the domain
//! aggregates. They hold `Arc<dyn Port>` collaborators and expose a single
//! `handle` method each.

pub mod catalog;
pub mod checkout;
pub mod entitlement;
