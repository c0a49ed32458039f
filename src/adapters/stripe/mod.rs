//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait against the Stripe REST API.
//! Payment intents are created and retrieved over HTTPS; webhook events
//! are verified with HMAC-SHA256 before any payload is trusted.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - All secrets are handled via `secrecy::SecretString`

mod gateway;
mod webhook_types;

pub use gateway::{StripeConfig, StripeGatewayAdapter};
