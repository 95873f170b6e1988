//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Every failure renders as `{"success": false, "error": "..."}`. Upstream
//! generation failures are NOT routed through this type: the generate
//! handler returns those as HTTP 200 with the same envelope, matching the
//! wire contract.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use riposte_core::service::reply::ReplyError;
use riposte_types::error::ValidationError;
use riposte_types::generate::GenerateError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failure (400).
    Validation(ValidationError),
    /// No API key configured (500).
    MissingApiKey,
    /// Vector store or embedding failure (500).
    Store(String),
    /// Anything else (500).
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<ReplyError> for ApiError {
    fn from(e: ReplyError) -> Self {
        match e {
            ReplyError::Validation(e) => ApiError::Validation(e),
            ReplyError::Memory(e) => ApiError::Store(e.to_string()),
            ReplyError::Generate(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                GenerateError::MissingApiKey.to_string(),
            ),
            ApiError::Store(msg) | ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let resp = ApiError::Validation(ValidationError::EmptyMessage).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_api_key_maps_to_500() {
        let resp = ApiError::MissingApiKey.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_reply_error_conversion() {
        let err = ApiError::from(ReplyError::Validation(ValidationError::UnknownChat(
            "Nemo".to_string(),
        )));
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
