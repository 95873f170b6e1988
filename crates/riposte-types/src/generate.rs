//! Generation request/response types for Riposte.
//!
//! These types model the seam between prompt composition and the upstream
//! model provider: the composed prompt going out, and the failure taxonomy
//! coming back. The error display strings double as the wire `error`
//! values returned to clients, so their exact wording is load-bearing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fully composed prompt, ready to send to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedPrompt {
    /// System instruction: persona voice plus the task directives.
    pub system: String,
    /// User-turn content: the message, optionally prefixed with recalled
    /// context or combined with a draft to rephrase.
    pub user_content: String,
}

/// Failures from reply generation, classified from the provider response.
///
/// Each variant's display string is returned verbatim in the `error`
/// field of the JSON envelope.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// The response carried no candidates at all.
    #[error("No candidates in response.")]
    NoCandidates,

    /// The candidate ran out of output tokens before any text part.
    #[error("Response cut off (MAX_TOKENS).")]
    Truncated,

    /// The candidate was blocked by the provider's safety filters.
    #[error("Response blocked by safety filters.")]
    SafetyBlocked,

    /// A candidate arrived but contained no text; `reason` is the raw
    /// finish reason reported by the provider.
    #[error("No text generated. Reason: {reason}")]
    Empty { reason: String },

    /// Transport failure, non-success HTTP status, or undecodable body.
    #[error("Generation Error: {0}")]
    Upstream(String),

    /// No API key was configured at startup.
    #[error("API key missing")]
    MissingApiKey,
}
