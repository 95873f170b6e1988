//! Persona roster HTTP handler.

use axum::Json;
use axum::extract::State;
use serde_json::json;

use crate::state::AppState;

/// GET /personas - list the available personas with descriptions.
pub async fn list_personas(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "personas": state.service.personas().summaries(),
    }))
}
