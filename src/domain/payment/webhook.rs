//! Webhook signature verification.
//!
//! HMAC-SHA256 verification of inbound webhook payloads with timestamp
//! validation to prevent replay attacks. Signature comparison is
//! constant-time. Payload parsing is left to the gateway adapter; this
//! module only decides authenticity.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of a webhook signature header.
///
/// Format: `t=<timestamp>,v1=<hex signature>[,v0=<legacy>]`. Unknown fields
/// are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// v1 signature (HMAC-SHA256).
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a signature header string.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::WebhookVerification` if the header is
    /// malformed or missing required fields.
    pub fn parse(header: &str) -> Result<Self, PaymentError> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                PaymentError::webhook_verification("invalid signature header format")
            })?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        PaymentError::webhook_verification("invalid signature timestamp")
                    })?);
                }
                "v1" => {
                    v1_signature = Some(hex::decode(value).map_err(|_| {
                        PaymentError::webhook_verification("invalid v1 signature hex")
                    })?);
                }
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| PaymentError::webhook_verification("missing signature timestamp"))?;
        let v1_signature = v1_signature
            .ok_or_else(|| PaymentError::webhook_verification("missing v1 signature"))?;

        Ok(SignatureHeader {
            timestamp,
            v1_signature,
        })
    }
}

/// Verifier for webhook payload authenticity.
pub struct WebhookVerifier {
    /// Shared webhook signing secret.
    secret: String,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the payload against its signature header.
    ///
    /// # Verification steps
    ///
    /// 1. Parse the signature header
    /// 2. Validate the timestamp is within the replay window
    /// 3. Compute the expected HMAC-SHA256 signature
    /// 4. Compare signatures in constant time
    ///
    /// # Errors
    ///
    /// Fails closed with `PaymentError::WebhookVerification` on any
    /// mismatch, stale timestamp, or malformed header.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), PaymentError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.validate_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        if !constant_time_compare(&expected, &header.v1_signature) {
            tracing::warn!("webhook signature mismatch");
            return Err(PaymentError::webhook_verification("invalid signature"));
        }

        Ok(())
    }

    fn validate_timestamp(&self, timestamp: i64) -> Result<(), PaymentError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > MAX_EVENT_AGE_SECS {
            tracing::warn!(age_secs = age, "webhook event too old, possible replay");
            return Err(PaymentError::webhook_verification(format!(
                "event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(PaymentError::webhook_verification(
                "event timestamp in the future",
            ));
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a hex HMAC-SHA256 signature the way a gateway would when
/// signing a webhook delivery. Intended for building test fixtures.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(signed_payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
