//! Reply generation pipeline.
//!
//! `ReplyService` coordinates one request end to end: validate, recall
//! context, compose the prompt, call the generator, sanitize, and persist
//! the finished exchange. Generation failures surface as structured
//! errors and are never persisted or retried. OTel GenAI spans instrument
//! every model call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Instrument, debug, info_span};

use riposte_types::error::{MemoryError, ValidationError};
use riposte_types::exchange::{ChatId, ExchangeRecord};
use riposte_types::generate::GenerateError;
use riposte_types::stance::Stance;

use crate::chat::ChatRegistry;
use crate::generate::ReplyGenerator;
use crate::memory::recall::recall_context;
use crate::memory::store::ExchangeStore;
use crate::memory::writer::store_exchange;
use crate::persona::PersonaRegistry;
use crate::prompt::ReplyPromptBuilder;
use crate::sanitize::sanitize_reply;

/// One reply request, after wire decoding but before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
    pub persona: String,
    pub stance: Stance,
    pub chat_id: ChatId,
    /// Caller's draft reply; non-empty switches to rephrase mode.
    pub response_hint: Option<String>,
}

/// A successful reply with the persona that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyOutcome {
    pub reply: String,
    pub persona: String,
}

/// Failures from the reply pipeline, by phase.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Orchestrates reply generation over injected store and generator ports.
pub struct ReplyService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    personas: Arc<PersonaRegistry>,
    chats: ChatRegistry,
    top_k: usize,
    memory_cap: usize,
}

impl<S, G> ReplyService<S, G>
where
    S: ExchangeStore,
    G: ReplyGenerator,
{
    pub fn new(
        store: Arc<S>,
        generator: Arc<G>,
        personas: Arc<PersonaRegistry>,
        chats: ChatRegistry,
        top_k: usize,
        memory_cap: usize,
    ) -> Self {
        Self {
            store,
            generator,
            personas,
            chats,
            top_k,
            memory_cap,
        }
    }

    pub fn personas(&self) -> &PersonaRegistry {
        &self.personas
    }

    pub fn chats(&self) -> &ChatRegistry {
        &self.chats
    }

    /// Run the full pipeline for one request.
    ///
    /// In rephrase mode (non-empty `response_hint`) retrieval is skipped
    /// outright; the context would be discarded by the composer anyway.
    /// The exchange is persisted only after sanitization succeeds, so a
    /// failed generation leaves the chat's memory untouched.
    pub async fn generate_reply(&self, request: &ReplyRequest) -> Result<ReplyOutcome, ReplyError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }
        let persona = self.personas.require(&request.persona)?;
        let slot = self.chats.require(&request.chat_id)?;

        let hint = request
            .response_hint
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty());

        let context = match hint {
            Some(_) => String::new(),
            None => recall_context(self.store.as_ref(), &request.chat_id, message, self.top_k).await,
        };

        let prompt = ReplyPromptBuilder::build(persona, message, &request.stance, &context, hint);

        // OTel GenAI semconv fields; the generator records the response
        // side (finish reason) onto this span.
        let span = info_span!(
            "generate_reply",
            gen_ai.operation.name = "generate_reply",
            gen_ai.provider.name = "gemini",
            gen_ai.request.model = self.generator.model(),
            gen_ai.response.finish_reasons = tracing::field::Empty,
            persona = %persona.name,
            chat = %request.chat_id,
            rephrase = hint.is_some(),
        );
        let raw = self
            .generator
            .generate(&prompt)
            .instrument(span)
            .await?;
        let reply = sanitize_reply(&raw);

        store_exchange(
            self.store.as_ref(),
            &slot,
            &request.chat_id,
            message,
            &persona.name,
            &request.stance,
            &reply,
            self.memory_cap,
        )
        .await?;
        debug!(chat = %request.chat_id, persona = %persona.name, "reply generated");

        Ok(ReplyOutcome {
            reply,
            persona: persona.name.clone(),
        })
    }

    /// Every stored exchange for a chat, oldest first.
    pub async fn memory_snapshot(&self, chat_id: &ChatId) -> Result<Vec<ExchangeRecord>, ReplyError> {
        self.chats.require(chat_id)?;
        Ok(self.store.get_all(chat_id).await?)
    }

    /// Drop a chat's stored exchanges and reset its sequence counter, so
    /// the next exchange is `{chat_id}_1` again.
    pub async fn clear_memory(&self, chat_id: &ChatId) -> Result<(), ReplyError> {
        let slot = self.chats.require(chat_id)?;
        self.store.clear(chat_id).await?;
        slot.reset().await;
        Ok(())
    }
}
