use crate::domain::payment::{
    ConfirmPaymentResponse, DonationRequest, ErrorEnvelope, ErrorPayload, Payment, PaymentStatus,
};
use crate::domain::wish::{Wish, WishStatus};
use crate::gateways::{build_reference, InitiateRequest, PaymentGateway};
use crate::repo::payments_repo::PaymentsRepo;
use crate::repo::wishes_repo::WishesRepo;
use axum::http::StatusCode;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct DonorService {
    pub payments_repo: PaymentsRepo,
    pub wishes_repo: WishesRepo,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl DonorService {
    pub async fn make_payment(&self, req: DonationRequest) -> Result<Payment, (StatusCode, ErrorEnvelope)> {
        validate_request(&req)?;

        let reference = build_reference(Utc::now().timestamp_millis());
        let outcome = self
            .gateway
            .initiate(InitiateRequest {
                reference,
                amount_minor: req.amount_minor,
                currency: req.currency.clone(),
                customer_email: req.donor_email.clone(),
                callback_url: req.callback_url.clone(),
            })
            .await
            .map_err(gateway_failed)?;

        if !outcome.success {
            return Err((
                StatusCode::BAD_GATEWAY,
                err("GATEWAY_INITIATION_FAILED", &outcome.message),
            ));
        }

        let transaction_id = outcome.transaction_id.ok_or_else(|| {
            (
                StatusCode::BAD_GATEWAY,
                err("GATEWAY_INITIATION_FAILED", "gateway returned no transaction id"),
            )
        })?;

        let payment = Payment {
            payment_id: Uuid::new_v4(),
            amount_minor: req.amount_minor,
            currency: req.currency.clone(),
            donor_id: req.donor_id.clone(),
            orphanage_id: req.orphanage_id.clone(),
            child_id: req.child_id.clone(),
            purpose: req.purpose,
            status: PaymentStatus::Pending,
            transaction_id,
            payment_url: outcome.payment_url,
            created_at: Utc::now(),
        };

        self.payments_repo.insert(&payment).await.map_err(internal)?;

        // A targeted donation claims the first pending wish as a side effect.
        // The read and the update are not atomic with the payment insert, and
        // not serialized against concurrent donations for the same child
        // (see DESIGN.md).
        if let Some(child_id) = &req.child_id {
            let wishes = self.wishes_repo.list_by_child(child_id).await.map_err(internal)?;
            if let Some(wish) = first_pending_wish(&wishes) {
                self.wishes_repo
                    .advance_to_in_progress(wish.id, &req.donor_id)
                    .await
                    .map_err(internal)?;
            }
        }

        Ok(payment)
    }

    /// Single verification attempt, driven by the client after redirect.
    /// No retry or backoff; a negative answer marks the payment failed.
    pub async fn confirm_payment(
        &self,
        payment_id: Uuid,
        transaction_id: &str,
    ) -> Result<ConfirmPaymentResponse, (StatusCode, ErrorEnvelope)> {
        let verified = self.gateway.verify(transaction_id).await;
        let computed = status_after_verification(verified);

        let updated = self
            .payments_repo
            .set_status_if_pending(payment_id, computed)
            .await
            .map_err(internal)?;

        let stored = if updated {
            None
        } else {
            tracing::warn!("payment {} already terminal, confirmation skipped", payment_id);
            self.payments_repo
                .find_by_id(payment_id)
                .await
                .map_err(internal)?
                .map(|p| p.status)
        };

        Ok(ConfirmPaymentResponse {
            payment_id,
            confirmed: verified,
            status: reported_status(updated, computed, stored),
        })
    }
}

pub fn status_after_verification(verified: bool) -> PaymentStatus {
    if verified {
        PaymentStatus::Successful
    } else {
        PaymentStatus::Failed
    }
}

/// A confirmation that lost to an earlier terminal transition reports the
/// durably stored status, not the one this attempt computed.
pub fn reported_status(
    updated: bool,
    computed: PaymentStatus,
    stored: Option<PaymentStatus>,
) -> PaymentStatus {
    if updated {
        computed
    } else {
        stored.unwrap_or(computed)
    }
}

/// First pending wish in insertion order; later pending wishes are left
/// untouched, so one donation advances at most one wish.
pub fn first_pending_wish(wishes: &[Wish]) -> Option<&Wish> {
    wishes.iter().find(|w| w.status == WishStatus::Pending)
}

fn validate_request(req: &DonationRequest) -> Result<(), (StatusCode, ErrorEnvelope)> {
    if req.amount_minor <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            err("INVALID_AMOUNT", "amount_minor must be > 0"),
        ));
    }
    if req.currency.len() != 3 || !req.currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err((
            StatusCode::BAD_REQUEST,
            err("INVALID_CURRENCY", "currency must be a 3-letter ISO code"),
        ));
    }
    if req.donor_email.is_empty() || !req.donor_email.contains('@') {
        return Err((
            StatusCode::BAD_REQUEST,
            err("INVALID_EMAIL", "donor_email is required"),
        ));
    }
    Ok(())
}

fn err(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        },
    }
}

fn gateway_failed(e: anyhow::Error) -> (StatusCode, ErrorEnvelope) {
    (StatusCode::BAD_GATEWAY, err("GATEWAY_INITIATION_FAILED", &e.to_string()))
}

fn internal(e: anyhow::Error) -> (StatusCode, ErrorEnvelope) {
    (StatusCode::INTERNAL_SERVER_ERROR, err("INTERNAL_ERROR", &e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentPurpose;

    fn base_request() -> DonationRequest {
        DonationRequest {
            amount_minor: 50,
            currency: "XAF".to_string(),
            donor_id: "d1".to_string(),
            donor_email: "d1@example.org".to_string(),
            orphanage_id: "o1".to_string(),
            child_id: Some("c1".to_string()),
            purpose: PaymentPurpose::Donation,
            callback_url: "https://hopebridge.example/donate/complete".to_string(),
        }
    }

    fn wish(id: u128, status: WishStatus) -> Wish {
        Wish {
            id: Uuid::from_u128(id),
            child_id: "c1".to_string(),
            item: "school bag".to_string(),
            status,
            donor_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn rejects_non_positive_amount() {
        let mut req = base_request();
        req.amount_minor = 0;
        let (status, envelope) = validate_request(&req).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.error.code, "INVALID_AMOUNT");
    }

    #[test]
    fn rejects_malformed_currency() {
        let mut req = base_request();
        req.currency = "xaf".to_string();
        let (_, envelope) = validate_request(&req).unwrap_err();
        assert_eq!(envelope.error.code, "INVALID_CURRENCY");
    }

    #[test]
    fn rejects_missing_email() {
        let mut req = base_request();
        req.donor_email = "not-an-email".to_string();
        let (_, envelope) = validate_request(&req).unwrap_err();
        assert_eq!(envelope.error.code, "INVALID_EMAIL");
    }

    #[test]
    fn accepts_well_formed_request() {
        assert!(validate_request(&base_request()).is_ok());
    }

    #[test]
    fn verification_outcome_maps_to_terminal_status() {
        assert_eq!(status_after_verification(true), PaymentStatus::Successful);
        assert_eq!(status_after_verification(false), PaymentStatus::Failed);
    }

    #[test]
    fn only_the_first_pending_wish_is_claimed() {
        let wishes = vec![
            wish(1, WishStatus::Fulfilled),
            wish(2, WishStatus::Pending),
            wish(3, WishStatus::Pending),
        ];
        let claimed = first_pending_wish(&wishes).unwrap();
        assert_eq!(claimed.id, Uuid::from_u128(2));
    }

    #[test]
    fn no_pending_wish_means_no_claim() {
        let wishes = vec![wish(1, WishStatus::InProgress), wish(2, WishStatus::Fulfilled)];
        assert!(first_pending_wish(&wishes).is_none());
    }

    #[test]
    fn lost_confirmation_reports_the_stored_status() {
        let status = reported_status(false, PaymentStatus::Failed, Some(PaymentStatus::Successful));
        assert_eq!(status, PaymentStatus::Successful);
    }

    #[test]
    fn applied_confirmation_reports_the_computed_status() {
        let status = reported_status(true, PaymentStatus::Failed, None);
        assert_eq!(status, PaymentStatus::Failed);
    }

    #[test]
    fn missing_row_falls_back_to_the_computed_status() {
        let status = reported_status(false, PaymentStatus::Failed, None);
        assert_eq!(status, PaymentStatus::Failed);
    }
}
