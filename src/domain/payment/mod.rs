//! Payment-intent types, error taxonomy, and webhook verification.

mod errors;
mod intent;
mod webhook;

pub use errors::PaymentError;
pub use intent::{IntentHandle, IntentStatus, IntentStatusObserved, ObservationChannel};
pub use webhook::{sign_payload, SignatureHeader, WebhookVerifier};
