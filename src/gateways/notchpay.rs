use crate::gateways::{redirect_url, InitiateOutcome, InitiateRequest, PaymentGateway};
use crate::mailer::templates;
use crate::mailer::Mailer;
use crate::repo::email_log_repo::EmailLogRepo;
use crate::repo::transactions_repo::TransactionsRepo;
use anyhow::Result;

/// Stand-in for the hosted NotchPay API. Transactions live in our own store
/// and `verify` marks them completed unconditionally; there is no callback
/// signature validation against an external gateway.
pub struct NotchPayGateway {
    pub transactions_repo: TransactionsRepo,
    pub email_log_repo: EmailLogRepo,
    pub mailer: Mailer,
}

#[async_trait::async_trait]
impl PaymentGateway for NotchPayGateway {
    fn name(&self) -> &'static str {
        "notchpay"
    }

    async fn initiate(&self, request: InitiateRequest) -> Result<InitiateOutcome> {
        self.transactions_repo
            .insert(
                &request.reference,
                request.amount_minor,
                &request.currency,
                &request.customer_email,
            )
            .await?;

        let payment_url = redirect_url(&request.callback_url, &request.reference);

        // Initiation email is best-effort; a mail outage must not fail the payment.
        let html = templates::payment_initiated(
            &request.customer_email,
            request.amount_minor,
            &request.currency,
            &request.reference,
        );
        if let Err(err) = self
            .mailer
            .send(&request.customer_email, "Your HopeBridge donation", &html)
            .await
        {
            tracing::error!("initiation email failed for {}: {}", request.reference, err);
        }

        Ok(InitiateOutcome {
            success: true,
            transaction_id: Some(request.reference.clone()),
            payment_url: Some(payment_url),
            message: "payment initiated".to_string(),
        })
    }

    async fn verify(&self, transaction_id: &str) -> bool {
        match self.verify_inner(transaction_id).await {
            Ok(verified) => verified,
            Err(err) => {
                tracing::warn!("verification error for {}: {}", transaction_id, err);
                false
            }
        }
    }
}

impl NotchPayGateway {
    async fn verify_inner(&self, transaction_id: &str) -> Result<bool> {
        let Some(tx) = self.transactions_repo.find_by_id(transaction_id).await? else {
            return Ok(false);
        };

        self.transactions_repo.mark_completed(&tx.id).await?;

        let html = templates::payment_confirmed(&tx.customer_email, tx.amount_minor, &tx.currency, &tx.id);
        if let Err(err) = self
            .email_log_repo
            .enqueue(&tx.customer_email, "Donation received — thank you", &html)
            .await
        {
            tracing::error!("confirmation email enqueue failed for {}: {}", tx.id, err);
        }

        Ok(true)
    }
}
