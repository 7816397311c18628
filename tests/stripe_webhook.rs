use hmac::{Hmac, Mac};
use hopebridge_payments::gateways::stripe::{parse_event, verify_signature, StripeEvent};
use sha2::Sha256;

fn signature_header(secret: &str, timestamp: &str, payload: &[u8]) -> String {
    let signed = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(signed.as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

const SUCCEEDED: &[u8] = br#"{"type":"payment_intent.succeeded","data":{"object":{"id":"pi_ok"}}}"#;
const FAILED: &[u8] = br#"{"type":"payment_intent.payment_failed","data":{"object":{"id":"pi_bad"}}}"#;

#[test]
fn valid_signature_passes() {
    let header = signature_header("whsec_abc", "1700000000", SUCCEEDED);
    assert!(verify_signature("whsec_abc", SUCCEEDED, &header).is_ok());
}

#[test]
fn wrong_secret_is_rejected() {
    let header = signature_header("whsec_abc", "1700000000", SUCCEEDED);
    assert!(verify_signature("whsec_other", SUCCEEDED, &header).is_err());
}

#[test]
fn replayed_signature_with_different_timestamp_is_rejected() {
    let header = signature_header("whsec_abc", "1700000000", SUCCEEDED);
    let forged = header.replace("t=1700000000", "t=1700009999");
    assert!(verify_signature("whsec_abc", SUCCEEDED, &forged).is_err());
}

#[test]
fn succeeded_and_failed_events_carry_intent_ids() {
    assert_eq!(
        parse_event(SUCCEEDED).unwrap(),
        StripeEvent::PaymentSucceeded {
            intent_id: "pi_ok".to_string()
        }
    );
    assert_eq!(
        parse_event(FAILED).unwrap(),
        StripeEvent::PaymentFailed {
            intent_id: "pi_bad".to_string()
        }
    );
}

#[test]
fn garbage_payload_is_an_error() {
    assert!(parse_event(b"not json").is_err());
}
