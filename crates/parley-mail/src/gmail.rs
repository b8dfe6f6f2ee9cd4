use crate::error::MailError;
use crate::message::{encode_raw, render_message};
use crate::Mailer;
use async_trait::async_trait;
use parley_types::EmailDraft;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Gmail API base URL.
pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";

/// Timeout for a single send request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct GmailSendResponse {
    id: String,
}

/// Sends mail through the Gmail REST API.
///
/// The access token is read from the configured environment variable on
/// every send so a token refreshed by an external helper is picked up
/// without restarting the assistant.
#[derive(Clone)]
pub struct GmailMailer {
    client: Client,
    base_url: String,
    token_env: String,
}

impl fmt::Debug for GmailMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GmailMailer")
            .field("base_url", &self.base_url)
            .field("token_env", &self.token_env)
            .finish()
    }
}

impl GmailMailer {
    pub fn new(token_env: impl Into<String>) -> Self {
        Self::with_base_url(token_env, GMAIL_API_BASE)
    }

    /// Create a mailer against a custom base URL (for testing).
    pub fn with_base_url(token_env: impl Into<String>, base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_env: token_env.into(),
        }
    }

    fn access_token(&self) -> Result<String, MailError> {
        let token = std::env::var(&self.token_env).map_err(|_| {
            MailError::Config(format!(
                "environment variable '{}' not set (required for Gmail access token)",
                self.token_env
            ))
        })?;
        if token.trim().is_empty() {
            return Err(MailError::Config(format!(
                "environment variable '{}' is empty",
                self.token_env
            )));
        }
        Ok(token)
    }
}

#[async_trait]
impl Mailer for GmailMailer {
    async fn send(&self, draft: &EmailDraft) -> Result<String, MailError> {
        let message = render_message(draft)?;
        let token = self.access_token()?;

        let url = format!("{}/messages/send", self.base_url);
        debug!(%url, "posting message to Gmail");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&serde_json::json!({ "raw": encode_raw(&message) }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(MailError::Api(format!("Gmail send failed ({status}): {body}")));
        }

        let sent: GmailSendResponse = resp.json().await?;
        info!(message_id = %sent.id, "Gmail message sent");
        Ok(sent.id)
    }
}
