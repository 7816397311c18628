use anyhow::{anyhow, bail, Context, Result};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::collections::HashMap;

pub struct StripeGateway {
    pub base_url: String,
    pub secret_key: String,
    pub webhook_secret: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: EventObject,
}

#[derive(Debug, Deserialize)]
struct EventObject {
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripeEvent {
    PaymentSucceeded { intent_id: String },
    PaymentFailed { intent_id: String },
    Ignored { event_type: String },
}

impl StripeGateway {
    pub async fn create_payment_intent(&self, amount_minor: i64, currency: &str) -> Result<String> {
        let mut params = HashMap::new();
        params.insert("amount", amount_minor.to_string());
        params.insert("currency", currency.to_lowercase());

        let resp = self
            .client
            .post(format!("{}/v1/payment_intents", self.base_url))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .context("stripe payment_intents call failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let message = resp
                .json::<StripeErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP_{}", status.as_u16()));
            bail!("stripe rejected payment intent: {}", message);
        }

        let intent: PaymentIntentResponse = resp.json().await.context("malformed stripe response")?;
        Ok(intent.client_secret)
    }

    pub fn parse_webhook(&self, payload: &[u8], signature_header: &str) -> Result<StripeEvent> {
        verify_signature(&self.webhook_secret, payload, signature_header)?;
        parse_event(payload)
    }
}

/// Checks the `Stripe-Signature` header: HMAC-SHA256 over `"{t}.{body}"`
/// with the endpoint secret, hex-encoded in the `v1` field.
pub fn verify_signature(secret: &str, payload: &[u8], signature_header: &str) -> Result<()> {
    let parts: HashMap<&str, &str> = signature_header
        .split(',')
        .filter_map(|part| {
            let mut kv = part.splitn(2, '=');
            Some((kv.next()?.trim(), kv.next()?))
        })
        .collect();

    let timestamp = parts.get("t").ok_or_else(|| anyhow!("missing timestamp in signature header"))?;
    let expected = parts.get("v1").ok_or_else(|| anyhow!("missing v1 signature"))?;

    let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| anyhow!("invalid webhook secret"))?;
    mac.update(signed_payload.as_bytes());
    let computed = hex::encode(mac.finalize().into_bytes());

    if computed != *expected {
        bail!("signature mismatch");
    }
    Ok(())
}

pub fn parse_event(payload: &[u8]) -> Result<StripeEvent> {
    let envelope: EventEnvelope = serde_json::from_slice(payload).context("malformed stripe event")?;
    Ok(match envelope.event_type.as_str() {
        "payment_intent.succeeded" => StripeEvent::PaymentSucceeded {
            intent_id: envelope.data.object.id,
        },
        "payment_intent.payment_failed" => StripeEvent::PaymentFailed {
            intent_id: envelope.data.object.id,
        },
        other => StripeEvent::Ignored {
            event_type: other.to_string(),
        },
    })
}
