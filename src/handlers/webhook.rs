use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::queries;
use crate::errors::AppError;
use crate::services::conversation;
use crate::state::AppState;

const FALLBACK_REPLY: &str = "Sorry, I'm having trouble right now. Please try again in a moment.";

#[derive(Deserialize)]
pub struct InboundMessage {
    pub conversation_id: String,
    pub text: String,
}

/// Asynchronous channel: replies are pushed through the messaging provider.
pub async fn message_webhook(
    State(state): State<Arc<AppState>>,
    Json(form): Json<InboundMessage>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let from = form.conversation_id.trim().to_string();
    let text = form.text.trim().to_string();

    if from.is_empty() {
        return Err(AppError::BadRequest("conversation_id is required".to_string()));
    }

    tracing::info!(conversation = %from, text = %text, "incoming message");

    let replies = match conversation::process_message(&state, &from, &text).await {
        Ok(replies) => replies,
        Err(e) => {
            tracing::error!(error = %e, conversation = %from, "conversation processing failed");
            vec![FALLBACK_REPLY.to_string()]
        }
    };

    let mut delivered = 0;
    let mut last_error = None;
    for reply in &replies {
        match state.messaging.send_message(&from, reply).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::error!(error = %e, conversation = %from, "failed to send reply");
                last_error = Some(e);
            }
        }
    }

    if delivered == 0 {
        if let Some(e) = last_error {
            return Err(AppError::Messaging(e.to_string()));
        }
    }

    // Cleanup expired conversations opportunistically
    if let Ok(db) = state.db() {
        match queries::expire_old_conversations(&db) {
            Ok(0) => {}
            Ok(count) => tracing::debug!(count, "expired old conversations"),
            Err(e) => tracing::warn!(error = %e, "failed to expire conversations"),
        }
    }

    Ok((StatusCode::ACCEPTED, Json(json!({ "delivered": delivered }))))
}
