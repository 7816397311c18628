use anyhow::{bail, Context, Result};
use serde_json::json;

pub mod templates;

/// Direct client for the hosted transactional email API. Call sites treat
/// sends as best-effort; a failed email never blocks the payment flow.
#[derive(Clone)]
pub struct Mailer {
    pub base_url: String,
    pub api_key: String,
    pub from: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

impl Mailer {
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let body = json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "html": html,
        });

        let resp = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .context("email API call failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            bail!("email API returned {}: {}", status, detail.chars().take(200).collect::<String>());
        }

        Ok(())
    }
}
