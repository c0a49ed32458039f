//! Provider-neutral payment-intent types.
//!
//! Webhooks and status polling are two delivery channels for the same state
//! machine. Both produce an [`IntentStatusObserved`] consumed by one
//! transition function on the order, so the channels cannot diverge in
//! outcome for the same underlying intent status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Gateway status of a payment intent, reduced to what the order state
/// machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    /// The charge settled.
    Succeeded,
    /// The payment method was declined or is missing.
    RequiresPaymentMethod,
    /// The gateway requires a client-side action this crate does not handle.
    RequiresAction(String),
    /// Any other provider-defined status. A no-op for the order.
    Other(String),
}

/// Freshly created intent: id plus the client secret needed to complete a
/// client-side confirmation step.
///
/// The secret lives in process memory only and must never be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentHandle {
    pub id: String,
    pub client_secret: String,
}

/// Which delivery channel reported an intent status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationChannel {
    /// Synchronous status poll against the gateway.
    Poll,
    /// Verified inbound webhook.
    Webhook,
}

/// A single observation of an intent's status, from either channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentStatusObserved {
    /// The gateway's intent id.
    pub intent_id: String,

    /// Observed status.
    pub status: IntentStatus,

    /// When the observation was made (webhook event time or poll time).
    pub observed_at: Timestamp,

    /// Which channel delivered it.
    pub channel: ObservationChannel,
}
