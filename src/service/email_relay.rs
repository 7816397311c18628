use crate::mailer::Mailer;
use crate::repo::email_log_repo::EmailLogRepo;
use anyhow::Result;
use chrono::{Duration, Utc};

const MAX_ATTEMPTS: i32 = 5;

/// Background worker over queued `email_logs` rows. Pending rows are locked
/// in batches, sent through the email API, and marked sent/failed with
/// bounded exponential backoff in between.
#[derive(Clone)]
pub struct EmailRelay {
    pub email_log_repo: EmailLogRepo,
    pub mailer: Mailer,
    pub poll_interval_ms: u64,
}

impl EmailRelay {
    pub async fn run(self) {
        loop {
            if let Err(err) = self.tick().await {
                tracing::error!("email relay error: {}", err);
            }
            tokio::time::sleep(std::time::Duration::from_millis(self.poll_interval_ms)).await;
        }
    }

    async fn tick(&self) -> Result<()> {
        let batch = self.email_log_repo.lock_pending(50).await?;
        if batch.is_empty() {
            return Ok(());
        }

        for item in batch {
            match self.mailer.send(&item.recipient, &item.subject, &item.html).await {
                Ok(()) => {
                    self.email_log_repo.mark_sent(item.id).await?;
                }
                Err(err) => {
                    let attempts = item.attempts + 1;
                    tracing::warn!("email send failed for log {}: {}", item.id, err);
                    if attempts >= MAX_ATTEMPTS {
                        self.email_log_repo.mark_failed(item.id, attempts).await?;
                    } else {
                        let next_attempt_at = Utc::now() + Duration::seconds(retry_backoff_seconds(attempts));
                        self.email_log_repo.mark_retry(item.id, attempts, next_attempt_at).await?;
                    }
                }
            }
        }

        Ok(())
    }
}

pub fn retry_backoff_seconds(attempts: i32) -> i64 {
    i64::min(300, 2_i64.pow(attempts.clamp(0, 8) as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(retry_backoff_seconds(1), 2);
        assert_eq!(retry_backoff_seconds(3), 8);
        assert_eq!(retry_backoff_seconds(8), 256);
        assert_eq!(retry_backoff_seconds(20), 300);
    }
}
