pub mod webhook;

use async_trait::async_trait;

#[async_trait]
pub trait MessagingProvider: Send + Sync {
    /// Delivers one bot message to the conversation `to`.
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

/// Used when no callback is configured; replies only show up in the logs.
pub struct LogMessenger;

#[async_trait]
impl MessagingProvider for LogMessenger {
    async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
        tracing::info!(conversation = to, body, "outgoing message (no callback configured)");
        Ok(())
    }
}
