use async_trait::async_trait;
use hopebridge_payments::domain::payment::PaymentStatus;
use hopebridge_payments::gateways::{redirect_url, InitiateOutcome, InitiateRequest, PaymentGateway};
use hopebridge_payments::service::donor_service::status_after_verification;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory stand-in with the same contract as the store-backed gateway:
/// initiation registers the transaction, verification completes it, and an
/// unknown id is indistinguishable from a rejection.
#[derive(Default)]
struct InMemoryGateway {
    transactions: Mutex<HashMap<String, bool>>,
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    async fn initiate(&self, request: InitiateRequest) -> anyhow::Result<InitiateOutcome> {
        self.transactions
            .lock()
            .unwrap()
            .insert(request.reference.clone(), false);

        Ok(InitiateOutcome {
            success: true,
            transaction_id: Some(request.reference.clone()),
            payment_url: Some(redirect_url(&request.callback_url, &request.reference)),
            message: "payment initiated".to_string(),
        })
    }

    async fn verify(&self, transaction_id: &str) -> bool {
        match self.transactions.lock().unwrap().get_mut(transaction_id) {
            Some(completed) => {
                *completed = true;
                true
            }
            None => false,
        }
    }
}

fn request(reference: &str) -> InitiateRequest {
    InitiateRequest {
        reference: reference.to_string(),
        amount_minor: 50,
        currency: "XAF".to_string(),
        customer_email: "d1@example.org".to_string(),
        callback_url: "https://hopebridge.example/donate/complete".to_string(),
    }
}

#[tokio::test]
async fn initiated_transaction_verifies_true_on_first_confirmation() {
    let gateway = InMemoryGateway::default();

    let outcome = gateway.initiate(request("tx-100")).await.unwrap();
    assert!(outcome.success);
    let transaction_id = outcome.transaction_id.unwrap();

    assert!(gateway.verify(&transaction_id).await);
    assert_eq!(
        status_after_verification(gateway.verify(&transaction_id).await),
        PaymentStatus::Successful
    );
}

#[tokio::test]
async fn unknown_transaction_fails_verification_and_the_payment() {
    let gateway = InMemoryGateway::default();
    gateway.initiate(request("tx-100")).await.unwrap();

    let verified = gateway.verify("bogus-tx").await;
    assert!(!verified);
    assert_eq!(status_after_verification(verified), PaymentStatus::Failed);
}

#[tokio::test]
async fn initiation_yields_a_redirect_url_carrying_the_transaction_id() {
    let gateway = InMemoryGateway::default();
    let outcome = gateway.initiate(request("tx-7")).await.unwrap();
    assert_eq!(
        outcome.payment_url.as_deref(),
        Some("https://hopebridge.example/donate/complete?transaction_id=tx-7")
    );
}
