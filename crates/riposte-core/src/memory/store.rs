//! Exchange store trait.
//!
//! Defines the interface for per-chat storage of question/reply exchanges
//! with semantic search. Implementations (e.g., LanceDB) live in
//! riposte-infra.

use riposte_types::error::MemoryError;
use riposte_types::exchange::{ChatId, ExchangeId, ExchangeRecord, RecalledExchange};

/// Trait for per-chat exchange storage with semantic search.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in riposte-infra.
pub trait ExchangeStore: Send + Sync {
    /// Store an exchange. The implementation embeds the user message and
    /// indexes the record under its id.
    fn add(
        &self,
        chat_id: &ChatId,
        record: &ExchangeRecord,
    ) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send;

    /// Search for the exchanges whose user messages are semantically
    /// closest to `text`, ranked nearest first.
    fn query(
        &self,
        chat_id: &ChatId,
        text: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RecalledExchange>, MemoryError>> + Send;

    /// All stored exchanges for a chat, sorted by ascending sequence
    /// number. Callers rely on this ordering for age-based eviction; the
    /// engine's own iteration order is never trusted.
    fn get_all(
        &self,
        chat_id: &ChatId,
    ) -> impl std::future::Future<Output = Result<Vec<ExchangeRecord>, MemoryError>> + Send;

    /// Delete specific exchanges by id.
    fn delete(
        &self,
        chat_id: &ChatId,
        ids: &[ExchangeId],
    ) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send;

    /// Count stored exchanges for a chat.
    fn count(
        &self,
        chat_id: &ChatId,
    ) -> impl std::future::Future<Output = Result<u64, MemoryError>> + Send;

    /// Remove every exchange for a chat. Idempotent: clearing an empty or
    /// never-written chat succeeds.
    fn clear(
        &self,
        chat_id: &ChatId,
    ) -> impl std::future::Future<Output = Result<(), MemoryError>> + Send;
}
