//! GeminiClient -- concrete [`ReplyGenerator`] implementation for Gemini.
//!
//! Sends non-streaming requests to the generateContent endpoint
//! (`/v1beta/models/{model}:generateContent`) and classifies the response
//! into reply text or a [`GenerateError`].
//!
//! The API key is wrapped in [`secrecy::SecretString`] and travels as a URL
//! query parameter, so the request URL is never logged.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use riposte_core::generate::ReplyGenerator;
use riposte_types::generate::{ComposedPrompt, GenerateError};

use super::types::{
    GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse,
};

/// Gemini reply generator.
///
/// Implements [`ReplyGenerator`] for the Gemini generateContent API.
/// Returns the raw candidate text; trimming and formatting cleanup is the
/// reply pipeline's job.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Sampling temperature sent with every request.
    const TEMPERATURE: f64 = 0.7;

    /// Output token ceiling sent with every request.
    const MAX_OUTPUT_TOKENS: u32 = 2048;

    /// Create a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gemini-2.5-flash")
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the generateContent URL.
    ///
    /// The API key is embedded as a query parameter, so the returned URL
    /// must never appear in logs or error messages.
    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            self.api_key.expose_secret()
        )
    }

    /// Convert a [`ComposedPrompt`] into a [`GeminiRequest`].
    fn to_gemini_request(&self, prompt: &ComposedPrompt) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.user_content.clone(),
                }],
            }],
            system_instruction: GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.system.clone(),
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: Self::TEMPERATURE,
                max_output_tokens: Self::MAX_OUTPUT_TOKENS,
            },
        }
    }
}

// GeminiClient intentionally does NOT derive Debug: the request URL carries
// the API key, and omitting Debug keeps internal state out of logs entirely.

impl ReplyGenerator for GeminiClient {
    async fn generate(&self, prompt: &ComposedPrompt) -> Result<String, GenerateError> {
        let body = self.to_gemini_request(prompt);
        let url = self.url();

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Upstream(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Upstream(format!("HTTP {status}: {error_body}")));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| GenerateError::Upstream(format!("failed to read response body: {e}")))?;

        tracing::debug!(model = %self.model, body = %raw, "gemini raw response");

        let parsed: GeminiResponse = serde_json::from_str(&raw)
            .map_err(|e| GenerateError::Upstream(format!("failed to parse response: {e}")))?;

        if let Some(candidate) = parsed.candidates.first() {
            tracing::Span::current().record(
                riposte_observe::genai_attrs::GEN_AI_RESPONSE_FINISH_REASONS,
                candidate.finish_reason(),
            );
        }

        extract_reply(parsed)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Classify a parsed response into reply text or a generation failure.
///
/// Only the first candidate is inspected. A candidate without usable text
/// is classified by its finish reason: `MAX_TOKENS` and `SAFETY` map to
/// their dedicated errors, anything else (including an absent reason)
/// surfaces verbatim in [`GenerateError::Empty`].
fn extract_reply(response: GeminiResponse) -> Result<String, GenerateError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GenerateError::NoCandidates);
    };

    if let Some(text) = candidate.first_text() {
        return Ok(text.to_string());
    }

    match candidate.finish_reason() {
        "MAX_TOKENS" => Err(GenerateError::Truncated),
        "SAFETY" => Err(GenerateError::SafetyBlocked),
        reason => Err(GenerateError::Empty {
            reason: reason.to_string(),
        }),
    }
}
