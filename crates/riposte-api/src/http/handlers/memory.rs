//! Conversation memory HTTP handlers.
//!
//! GET /memory/{chat_id} returns the stored exchanges for a chat in
//! insertion order; DELETE /memory/{chat_id} wipes them and resets the
//! chat's sequence counter.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::json;

use riposte_types::exchange::{ChatId, ExchangeRecord};

use crate::http::error::ApiError;
use crate::state::AppState;

/// Wire shape of a single stored exchange.
#[derive(Debug, Serialize)]
pub struct ConversationView {
    pub id: String,
    pub user_message: String,
    pub response: String,
    pub persona: String,
    pub timestamp: String,
}

impl From<&ExchangeRecord> for ConversationView {
    fn from(record: &ExchangeRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_message: record.user_message.clone(),
            response: record.response.clone(),
            persona: record.persona.clone(),
            timestamp: record.created_at.to_rfc3339(),
        }
    }
}

/// GET /memory/{chat_id} - list stored exchanges for a chat.
pub async fn get_memory(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let chat_id = ChatId::from(chat_id);
    let records = state.service.memory_snapshot(&chat_id).await?;
    let conversations: Vec<ConversationView> =
        records.iter().map(ConversationView::from).collect();

    Ok(Json(json!({
        "success": true,
        "chat_id": chat_id,
        "conversations": conversations,
        "count": conversations.len(),
    })))
}

/// DELETE /memory/{chat_id} - wipe a chat's stored exchanges.
pub async fn clear_memory(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let chat_id = ChatId::from(chat_id);
    state.service.clear_memory(&chat_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("{chat_id} memory cleared"),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use riposte_types::exchange::ExchangeId;
    use riposte_types::stance::Stance;

    #[test]
    fn test_conversation_view_from_record() {
        let chat = ChatId::from("Timo");
        let record = ExchangeRecord {
            id: ExchangeId::new(&chat, 3),
            user_message: "lunch?".to_string(),
            response: "Obviously. I've already picked the place.".to_string(),
            persona: "The Strategist".to_string(),
            stance: Stance::Agree,
            seq: 3,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap(),
        };

        let view = ConversationView::from(&record);
        assert_eq!(view.id, "Timo_3");
        assert_eq!(view.user_message, "lunch?");
        assert_eq!(view.persona, "The Strategist");
        assert_eq!(view.timestamp, "2025-06-01T12:30:00+00:00");
    }
}
