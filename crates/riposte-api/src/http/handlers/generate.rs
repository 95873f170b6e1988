//! Reply generation HTTP handler.
//!
//! POST /generate
//!
//! Body: `{message, persona, stance?, chat_id?, response_hint?}`.
//! Validation failures are 400, a missing API key is 500, and upstream
//! generation failures come back as HTTP 200 with
//! `{"success": false, "error": "..."}` so the UI can show them inline.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use riposte_core::service::reply::{ReplyError, ReplyRequest};
use riposte_types::exchange::ChatId;
use riposte_types::stance::Stance;

use crate::http::error::ApiError;
use crate::state::AppState;

/// Request body for the generate endpoint.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// The incoming message to reply to.
    #[serde(default)]
    pub message: String,

    /// Persona name from the roster.
    #[serde(default)]
    pub persona: String,

    /// Requested stance (defaults to Agree).
    #[serde(default)]
    pub stance: Stance,

    /// Target chat thread (defaults to Timo).
    #[serde(default = "default_chat_id")]
    pub chat_id: ChatId,

    /// Caller's draft reply; non-empty switches to rephrase mode.
    #[serde(default)]
    pub response_hint: Option<String>,
}

fn default_chat_id() -> ChatId {
    ChatId::from("Timo")
}

/// POST /generate - generate one persona reply.
pub async fn generate_reply(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.api_key_present {
        return Err(ApiError::MissingApiKey);
    }

    let request = ReplyRequest {
        message: body.message,
        persona: body.persona,
        stance: body.stance,
        chat_id: body.chat_id,
        response_hint: body.response_hint,
    };

    match state.service.generate_reply(&request).await {
        Ok(outcome) => Ok(Json(json!({
            "success": true,
            "reply": outcome.reply,
            "persona": outcome.persona,
        }))),
        // Generation failures keep HTTP 200; the envelope carries the error
        Err(ReplyError::Generate(e)) => {
            tracing::warn!(persona = %request.persona, error = %e, "reply generation failed");
            Ok(Json(json!({
                "success": false,
                "error": e.to_string(),
            })))
        }
        Err(e) => Err(ApiError::from(e)),
    }
}
