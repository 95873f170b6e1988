//! Exchange types for Riposte.
//!
//! An exchange is one stored question/reply pair for a chat. Exchanges are
//! immutable once written; they leave the store only through cap eviction
//! or an explicit clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stance::Stance;

use std::fmt;

/// Identifier for a chat thread (e.g. "Timo", "Shark").
///
/// Validation against the configured chat set happens in the registry;
/// the type itself is a plain case-sensitive label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChatId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ChatId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier for a stored exchange: `{chat_id}_{seq}`.
///
/// The sequence number is per-chat and strictly increasing, so ids sort
/// in insertion order within a chat and never repeat until the chat's
/// memory is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeId(String);

impl ExchangeId {
    pub fn new(chat_id: &ChatId, seq: u64) -> Self {
        Self(format!("{chat_id}_{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ExchangeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A stored question/reply exchange.
///
/// `seq` duplicates the numeric suffix of `id` so that age ordering never
/// depends on how the storage engine happens to iterate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRecord {
    pub id: ExchangeId,
    /// The incoming user message (the embedded document).
    pub user_message: String,
    /// The generated reply.
    pub response: String,
    /// Persona name active when the reply was generated.
    pub persona: String,
    /// Stance requested when the reply was generated.
    pub stance: Stance,
    /// Per-chat insertion sequence, 1-based.
    pub seq: i64,
    pub created_at: DateTime<Utc>,
}

/// A past exchange returned by similarity search, ranked by distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalledExchange {
    /// The past user message that matched the query.
    pub user_message: String,
    /// The reply given at the time.
    pub response: String,
    /// Persona that produced the reply.
    pub persona: String,
    /// Raw cosine distance from the query embedding (lower is closer).
    pub distance: f32,
}
