use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::MessagingProvider;

/// Posts each bot message to the channel's callback URL.
pub struct WebhookMessenger {
    callback_url: String,
    client: reqwest::Client,
}

impl WebhookMessenger {
    pub fn new(callback_url: String) -> Self {
        Self {
            callback_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MessagingProvider for WebhookMessenger {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        self.client
            .post(&self.callback_url)
            .json(&json!({
                "conversation_id": to,
                "text": body,
            }))
            .send()
            .await
            .context("failed to call message callback")?
            .error_for_status()
            .context("message callback returned error")?;

        Ok(())
    }
}
