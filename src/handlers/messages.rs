use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatMessage {
    pub conversation_id: Option<String>,
    pub text: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub conversation_id: String,
    pub replies: Vec<String>,
}

/// Synchronous channel: the bot's replies come back in the response body.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatMessage>,
) -> Result<Json<ChatResponse>, AppError> {
    let conversation_id = match payload.conversation_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        Some(_) => return Err(AppError::BadRequest("conversation_id is empty".to_string())),
        None => uuid::Uuid::new_v4().to_string(),
    };

    let replies = conversation::process_message(&state, &conversation_id, payload.text.trim())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, conversation = %conversation_id, "conversation processing failed");
            AppError::Conversation(e.to_string())
        })?;

    Ok(Json(ChatResponse {
        conversation_id,
        replies,
    }))
}
