//! In-memory payment gateway with scriptable intent statuses.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{
    IntentHandle, IntentStatus, IntentStatusObserved, ObservationChannel, PaymentError,
    WebhookVerifier,
};
use crate::ports::PaymentGateway;

/// Scriptable gateway: created intents get sequential ids, statuses are
/// set by the test, webhooks are verified with a real HMAC secret and a
/// minimal JSON payload of the shape
/// `{"intent_id": "...", "status": "...", "created": 123}`.
pub struct MemoryGateway {
    verifier: WebhookVerifier,
    counter: Mutex<u64>,
    statuses: Mutex<HashMap<String, IntentStatus>>,
    fail_create: Mutex<bool>,
}

impl MemoryGateway {
    /// Creates a gateway verifying webhooks with the given secret.
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            verifier: WebhookVerifier::new(webhook_secret),
            counter: Mutex::new(0),
            statuses: Mutex::new(HashMap::new()),
            fail_create: Mutex::new(false),
        }
    }

    /// Scripts the status returned for an intent id.
    pub fn set_intent_status(&self, intent_id: impl Into<String>, status: IntentStatus) {
        self.statuses.lock().unwrap().insert(intent_id.into(), status);
    }

    /// Makes the next `create_intent` calls fail.
    pub fn fail_next_create(&self, fail: bool) {
        *self.fail_create.lock().unwrap() = fail;
    }
}

/// Webhook payload shape understood by [`MemoryGateway`].
#[derive(serde::Serialize, serde::Deserialize)]
struct MemoryWebhookPayload {
    intent_id: String,
    status: String,
    #[serde(default)]
    next_action: Option<String>,
    created: u64,
}

fn parse_status(status: &str, next_action: Option<String>) -> IntentStatus {
    match status {
        "succeeded" => IntentStatus::Succeeded,
        "requires_payment_method" => IntentStatus::RequiresPaymentMethod,
        "requires_action" => {
            IntentStatus::RequiresAction(next_action.unwrap_or_else(|| "unknown".to_string()))
        }
        other => IntentStatus::Other(other.to_string()),
    }
}

#[async_trait]
impl PaymentGateway for MemoryGateway {
    async fn create_intent(
        &self,
        _amount_minor_units: i64,
        _currency: &str,
        _description: &str,
    ) -> Result<IntentHandle, PaymentError> {
        if *self.fail_create.lock().unwrap() {
            return Err(PaymentError::intent_creation("scripted failure"));
        }

        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        Ok(IntentHandle {
            id: format!("pi_{}", counter),
            client_secret: format!("sec_{}", counter),
        })
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<IntentStatus, PaymentError> {
        self.statuses
            .lock()
            .unwrap()
            .get(intent_id)
            .cloned()
            .ok_or_else(|| PaymentError::intent_retrieval(intent_id, "no such intent"))
    }

    fn verify_webhook(
        &self,
        raw_body: &[u8],
        signature_header: &str,
    ) -> Result<IntentStatusObserved, PaymentError> {
        self.verifier.verify(raw_body, signature_header)?;

        let payload: MemoryWebhookPayload = serde_json::from_slice(raw_body)
            .map_err(|e| PaymentError::webhook_verification(format!("invalid payload: {}", e)))?;

        Ok(IntentStatusObserved {
            intent_id: payload.intent_id,
            status: parse_status(&payload.status, payload.next_action),
            observed_at: Timestamp::from_unix_secs(payload.created),
            channel: ObservationChannel::Webhook,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::sign_payload;

    const SECRET: &str = "whsec_memory";

    #[tokio::test]
    async fn create_intent_issues_sequential_handles() {
        let gateway = MemoryGateway::new(SECRET);
        let first = gateway.create_intent(100, "usd", "test").await.unwrap();
        let second = gateway.create_intent(100, "usd", "test").await.unwrap();

        assert_eq!(first.id, "pi_1");
        assert_eq!(first.client_secret, "sec_1");
        assert_eq!(second.id, "pi_2");
    }

    #[tokio::test]
    async fn retrieve_returns_scripted_status() {
        let gateway = MemoryGateway::new(SECRET);
        gateway.set_intent_status("pi_1", IntentStatus::Succeeded);

        let status = gateway.retrieve_intent("pi_1").await.unwrap();
        assert_eq!(status, IntentStatus::Succeeded);
    }

    #[tokio::test]
    async fn retrieve_unknown_intent_fails() {
        let gateway = MemoryGateway::new(SECRET);
        assert!(gateway.retrieve_intent("pi_missing").await.is_err());
    }

    #[test]
    fn verify_webhook_roundtrips_signed_payload() {
        let gateway = MemoryGateway::new(SECRET);
        let body =
            br#"{"intent_id":"pi_1","status":"succeeded","created":1705276800}"#.to_vec();
        let ts = chrono::Utc::now().timestamp();
        let header = format!("t={},v1={}", ts, sign_payload(SECRET, ts, &body));

        let observed = gateway.verify_webhook(&body, &header).unwrap();
        assert_eq!(observed.intent_id, "pi_1");
        assert_eq!(observed.status, IntentStatus::Succeeded);
        assert_eq!(observed.channel, ObservationChannel::Webhook);
    }

    #[test]
    fn verify_webhook_rejects_bad_signature() {
        let gateway = MemoryGateway::new(SECRET);
        let body = br#"{"intent_id":"pi_1","status":"succeeded","created":1705276800}"#;
        let ts = chrono::Utc::now().timestamp();
        let header = format!("t={},v1={}", ts, sign_payload("whsec_wrong", ts, body));

        assert!(gateway.verify_webhook(body, &header).is_err());
    }
}
