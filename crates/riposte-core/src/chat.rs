//! Chat registry for Riposte.
//!
//! Each chat owns one exchange collection and one monotonically increasing
//! sequence counter. The counter lives behind a per-chat async mutex that
//! writers hold across the whole increment/insert/prune sequence, so
//! concurrent requests to the same chat cannot interleave their ids.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use riposte_types::error::ValidationError;
use riposte_types::exchange::ChatId;

/// Default chat set when no configuration overrides it.
pub const DEFAULT_CHATS: [&str; 2] = ["Timo", "Shark"];

/// Per-chat write state: the sequence counter, guarded by the write lock.
#[derive(Debug)]
pub struct ChatSlot {
    counter: Mutex<u64>,
}

impl ChatSlot {
    fn new() -> Self {
        Self {
            counter: Mutex::new(0),
        }
    }

    /// Lock the chat's write path. The guard derefs to the sequence
    /// counter; incrementing it and inserting the record must happen
    /// under the same guard.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, u64> {
        self.counter.lock().await
    }

    /// Reset the sequence counter to zero (after a memory clear).
    pub async fn reset(&self) {
        *self.counter.lock().await = 0;
    }

    /// Current counter value, for inspection.
    pub async fn current(&self) -> u64 {
        *self.counter.lock().await
    }
}

/// The set of chats this deployment serves.
///
/// Built once at startup from configuration; chats are never added or
/// removed at runtime.
#[derive(Debug, Clone)]
pub struct ChatRegistry {
    slots: Arc<DashMap<ChatId, Arc<ChatSlot>>>,
    order: Arc<Vec<ChatId>>,
}

impl ChatRegistry {
    pub fn new(chat_ids: impl IntoIterator<Item = ChatId>) -> Self {
        let slots = DashMap::new();
        let mut order = Vec::new();
        for id in chat_ids {
            if slots.insert(id.clone(), Arc::new(ChatSlot::new())).is_none() {
                order.push(id);
            }
        }
        Self {
            slots: Arc::new(slots),
            order: Arc::new(order),
        }
    }

    /// Registry over the default chat set.
    pub fn default_set() -> Self {
        Self::new(DEFAULT_CHATS.iter().map(|&c| ChatId::from(c)))
    }

    /// Look up a chat's slot, mapping absence to a validation error.
    pub fn require(&self, chat_id: &ChatId) -> Result<Arc<ChatSlot>, ValidationError> {
        self.slots
            .get(chat_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| ValidationError::UnknownChat(chat_id.to_string()))
    }

    pub fn contains(&self, chat_id: &ChatId) -> bool {
        self.slots.contains_key(chat_id)
    }

    /// Chat ids in configuration order.
    pub fn chat_ids(&self) -> Vec<ChatId> {
        self.order.as_ref().clone()
    }
}
