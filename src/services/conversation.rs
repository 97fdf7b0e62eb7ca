use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::db::queries;
use crate::dialogs::{DialogEngine, TurnContext};
use crate::models::{Conversation, DialogState, DialogTurnResult, DialogValue};
use crate::state::AppState;

/// Runs one user turn for `conversation_id` and returns the bot's replies.
pub async fn process_message(
    state: &Arc<AppState>,
    conversation_id: &str,
    message: &str,
) -> anyhow::Result<Vec<String>> {
    // Load or create conversation
    let existing = {
        let db = state.db()?;
        queries::get_conversation(&db, conversation_id)?
    };
    let mut conv = existing.unwrap_or_else(|| new_conversation(conversation_id));

    tracing::info!(
        conversation = conversation_id,
        stack = %conv.dialog.describe(),
        "processing message"
    );

    let mut ctx = TurnContext::new(message);
    let engine = DialogEngine::new(&state.capabilities);
    let result = engine.on_turn(&mut conv.dialog, &mut ctx).await;

    match &result {
        DialogTurnResult::Complete(DialogValue::Booking(details)) => {
            tracing::info!(conversation = conversation_id, ?details, "booking completed");
        }
        DialogTurnResult::Complete(_) => {
            tracing::info!(conversation = conversation_id, "booking refused");
        }
        DialogTurnResult::Cancelled => {
            tracing::info!(conversation = conversation_id, "booking cancelled");
        }
        DialogTurnResult::Waiting => {}
    }

    let now = Utc::now().naive_utc();
    conv.last_activity = now;
    conv.expires_at = now + Duration::minutes(state.config.conversation_ttl_minutes);

    {
        let db = state.db()?;
        queries::save_conversation(&db, &conv)?;
    }

    Ok(ctx.into_replies())
}

fn new_conversation(id: &str) -> Conversation {
    let now = Utc::now().naive_utc();
    Conversation {
        id: id.to_string(),
        dialog: DialogState::default(),
        last_activity: now,
        expires_at: now + Duration::minutes(30),
    }
}
