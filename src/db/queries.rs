use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Conversation, DialogState};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── Conversations ──

/// Loads a conversation unless it is missing or expired.
pub fn get_conversation(conn: &Connection, id: &str) -> anyhow::Result<Option<Conversation>> {
    let now = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
    let mut stmt = conn.prepare(
        "SELECT id, state, last_activity, expires_at FROM conversations WHERE id = ?1 AND expires_at > ?2",
    )?;

    let result = stmt.query_row(params![id, now], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    });

    match result {
        Ok((id, state_json, last_activity_str, expires_at_str)) => {
            let dialog: DialogState = match serde_json::from_str(&state_json) {
                Ok(dialog) => dialog,
                Err(e) => {
                    tracing::warn!(conversation = %id, error = %e, "unreadable dialog state, starting over");
                    DialogState::default()
                }
            };

            let last_activity = NaiveDateTime::parse_from_str(&last_activity_str, TIMESTAMP_FORMAT)
                .unwrap_or_else(|_| Utc::now().naive_utc());
            let expires_at = NaiveDateTime::parse_from_str(&expires_at_str, TIMESTAMP_FORMAT)
                .unwrap_or_else(|_| Utc::now().naive_utc());

            Ok(Some(Conversation {
                id,
                dialog,
                last_activity,
                expires_at,
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_conversation(conn: &Connection, conv: &Conversation) -> anyhow::Result<()> {
    let state_json = serde_json::to_string(&conv.dialog)?;
    let last_activity = conv.last_activity.format(TIMESTAMP_FORMAT).to_string();
    let expires_at = conv.expires_at.format(TIMESTAMP_FORMAT).to_string();

    conn.execute(
        "INSERT INTO conversations (id, state, last_activity, expires_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
           state = excluded.state,
           last_activity = excluded.last_activity,
           expires_at = excluded.expires_at",
        params![conv.id, state_json, last_activity, expires_at],
    )?;
    Ok(())
}

pub fn expire_old_conversations(conn: &Connection) -> anyhow::Result<usize> {
    let now = Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string();
    let count = conn.execute("DELETE FROM conversations WHERE expires_at <= ?1", params![now])?;
    Ok(count)
}
