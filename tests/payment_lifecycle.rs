use chrono::Utc;
use hopebridge_payments::domain::payment::PaymentStatus;
use hopebridge_payments::domain::wish::{Wish, WishStatus};
use hopebridge_payments::gateways::{build_reference, redirect_url};
use hopebridge_payments::service::donor_service::{
    first_pending_wish, reported_status, status_after_verification,
};
use uuid::Uuid;

fn wish(id: u128, status: WishStatus) -> Wish {
    Wish {
        id: Uuid::from_u128(id),
        child_id: "c1".to_string(),
        item: "winter coat".to_string(),
        status,
        donor_id: None,
        created_at: Utc::now(),
    }
}

#[test]
fn verified_payment_becomes_successful() {
    assert_eq!(status_after_verification(true), PaymentStatus::Successful);
}

#[test]
fn unverified_payment_becomes_failed() {
    assert_eq!(status_after_verification(false), PaymentStatus::Failed);
}

#[test]
fn both_confirmation_outcomes_are_terminal() {
    assert!(status_after_verification(true).is_terminal());
    assert!(status_after_verification(false).is_terminal());
}

#[test]
fn gateway_reference_is_timestamp_based() {
    let reference = build_reference(1_700_000_000_123);
    assert!(reference.starts_with("tx-"));
    assert!(reference.ends_with("1700000000123"));
}

#[test]
fn a_targeted_donation_claims_exactly_one_wish() {
    // Several pending wishes exist; only the oldest is selected.
    let wishes = vec![
        wish(1, WishStatus::Pending),
        wish(2, WishStatus::Pending),
        wish(3, WishStatus::Pending),
    ];
    let claimed: Vec<_> = first_pending_wish(&wishes).into_iter().collect();
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].id, Uuid::from_u128(1));
}

#[test]
fn fulfilled_and_in_progress_wishes_are_skipped() {
    let wishes = vec![
        wish(1, WishStatus::Fulfilled),
        wish(2, WishStatus::InProgress),
        wish(3, WishStatus::Pending),
    ];
    assert_eq!(first_pending_wish(&wishes).unwrap().id, Uuid::from_u128(3));
}

#[test]
fn a_child_without_pending_wishes_yields_no_claim() {
    let wishes = vec![wish(1, WishStatus::Fulfilled)];
    assert!(first_pending_wish(&wishes).is_none());
    assert!(first_pending_wish(&[]).is_none());
}

#[test]
fn confirmation_never_rewrites_a_terminal_payment() {
    // A payment already stored successful keeps reporting successful even if
    // a late confirmation attempt computed failed.
    let status = reported_status(false, PaymentStatus::Failed, Some(PaymentStatus::Successful));
    assert_eq!(status, PaymentStatus::Successful);
}

#[test]
fn payment_url_carries_transaction_id() {
    let url = redirect_url("https://hopebridge.example/donate/complete", "tx-99");
    assert!(url.ends_with("?transaction_id=tx-99"));
}
