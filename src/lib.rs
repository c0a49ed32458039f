//! Entitlements - Offer catalog resolution and payment-intent reconciliation
//!
//! This crate grants and tracks purchasable entitlements (subscriptions and
//! one-off token bundles), reconciles them against an external payment
//! provider's asynchronous intent lifecycle, and resolves overlapping
//! commercial offers into the concrete catalog a given user sees.
//!
//! Persistence and the payment provider are consumed behind ports; host
//! applications supply the adapters (or use the in-memory ones for tests).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::catalog::merge_offers;
