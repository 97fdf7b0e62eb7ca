pub mod entities;
pub mod luis;

use async_trait::async_trait;

use crate::models::RecognizerResult;

#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, utterance: &str) -> anyhow::Result<RecognizerResult>;
}
