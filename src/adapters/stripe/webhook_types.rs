//! Stripe wire types for intent retrieval and webhook handling.
//!
//! These structs mirror the Stripe JSON shapes we actually consume; every
//! field the core does not read is left out and tolerated by serde.

use serde::Deserialize;

/// Raw Stripe webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeWebhookEvent {
    /// Unique event identifier (evt_...).
    pub id: String,

    /// Event type (e.g., "payment_intent.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix timestamp when the event was created.
    pub created: i64,

    /// Event payload containing the affected object.
    pub data: StripeEventData,

    /// Whether this is a live or test event.
    pub livemode: bool,
}

/// Event data container.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    /// The object affected by this event.
    pub object: serde_json::Value,
}

/// Stripe PaymentIntent object, as returned by the API and embedded in
/// `payment_intent.*` events.
#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    /// Unique intent identifier (pi_...).
    pub id: String,

    /// Intent status (succeeded, requires_payment_method, ...).
    pub status: String,

    /// Client secret for browser-side confirmation. Absent in webhook
    /// payloads delivered without expansion.
    pub client_secret: Option<String>,

    /// Pending action details when status is requires_action.
    pub next_action: Option<StripeNextAction>,
}

/// Next-action container on a payment intent.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeNextAction {
    /// Action discriminator (e.g., "use_stripe_sdk", "redirect_to_url").
    #[serde(rename = "type")]
    pub action_type: String,
}
