//! Reply generator trait definition.
//!
//! This is the core abstraction over the upstream model provider. It takes
//! a composed prompt and returns raw reply text; classification of provider
//! failures into the `GenerateError` taxonomy is the implementation's job,
//! sanitization of successful text is the pipeline's.
//!
//! Uses RPITIT (native async fn in traits, Rust 2024 edition).
//! Implementations live in riposte-infra (e.g., `GeminiClient`).

use riposte_types::generate::{ComposedPrompt, GenerateError};

/// Trait for model backends that turn a composed prompt into reply text.
pub trait ReplyGenerator: Send + Sync {
    /// Send the prompt and return the raw generated text.
    fn generate(
        &self,
        prompt: &ComposedPrompt,
    ) -> impl std::future::Future<Output = Result<String, GenerateError>> + Send;

    /// Model identifier used for generation (e.g., "gemini-2.5-flash").
    fn model(&self) -> &str;
}
