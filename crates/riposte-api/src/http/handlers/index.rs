//! Static chat page handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::state::AppState;

/// GET / - serve the chat UI.
pub async fn serve_index(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(state.web_dir.join("index.html")).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error: index.html not found.",
        )
            .into_response(),
    }
}
