//! Gemini generateContent API types.
//!
//! These are Gemini-specific request/response structures used for HTTP
//! communication with the `generateContent` endpoint. They are NOT the
//! provider-agnostic types from riposte-types -- those stay wire-neutral.

use serde::{Deserialize, Serialize};

/// Request body for the Gemini generateContent API.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    pub system_instruction: GeminiContent,
    #[serde(rename = "generationConfig")]
    pub generation_config: GeminiGenerationConfig,
}

/// A content block: an ordered list of parts.
///
/// Used on both sides of the wire; response content may arrive without
/// a `parts` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A single text part.
///
/// Non-text response parts deserialize with an empty `text`, which the
/// client treats the same as no text at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

/// Sampling configuration sent with every request.
#[derive(Debug, Clone, Serialize)]
pub struct GeminiGenerationConfig {
    pub temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

/// Response body from the Gemini generateContent API.
///
/// Only the fields the reply path reads are modeled; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// A single candidate reply.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

impl GeminiCandidate {
    /// Text of the first part, when the candidate produced any.
    ///
    /// Only the first part counts, and an empty string is the same as no
    /// text: such candidates are classified by finish reason instead.
    pub fn first_text(&self) -> Option<&str> {
        let text = self.content.as_ref()?.parts.first()?.text.as_str();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Finish reason reported by the API, `UNKNOWN` when absent.
    pub fn finish_reason(&self) -> &str {
        self.finish_reason.as_deref().unwrap_or("UNKNOWN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "Current message: hello".to_string(),
                }],
            }],
            system_instruction: GeminiContent {
                parts: vec![GeminiPart {
                    text: "You are terse.".to_string(),
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: 0.7,
                max_output_tokens: 2048,
            },
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Current message: hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "You are terse.");
        assert_eq!(json["generationConfig"]["temperature"], 0.7);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        // camelCase field names on the wire, not snake_case
        assert!(json.get("system_instruction").is_none());
        assert!(json["generationConfig"].get("max_output_tokens").is_none());
    }

    #[test]
    fn test_response_deserialization_with_text() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "Sure, count me in."}]},
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.candidates.len(), 1);
        assert_eq!(resp.candidates[0].first_text(), Some("Sure, count me in."));
        assert_eq!(resp.candidates[0].finish_reason(), "STOP");
    }

    #[test]
    fn test_response_deserialization_no_candidates_field() {
        let resp: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.candidates.is_empty());
    }

    #[test]
    fn test_candidate_without_content() {
        let json = r#"{"finishReason": "SAFETY"}"#;
        let candidate: GeminiCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.first_text(), None);
        assert_eq!(candidate.finish_reason(), "SAFETY");
    }

    #[test]
    fn test_part_without_text_is_empty() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"thought": true}]},
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.candidates[0].first_text(), None);
    }

    #[test]
    fn test_only_first_part_counts() {
        let json = r#"{
            "candidates": [{
                "content": {"parts": [{"text": ""}, {"text": "later part"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let resp: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.candidates[0].first_text(), None);
    }

    #[test]
    fn test_finish_reason_defaults_to_unknown() {
        let json = r#"{"content": {"parts": []}}"#;
        let candidate: GeminiCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.finish_reason(), "UNKNOWN");
    }
}
