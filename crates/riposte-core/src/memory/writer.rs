//! Exchange persistence with cap enforcement.
//!
//! Writes a finished exchange into the chat's store and evicts the oldest
//! records once the chat exceeds its cap. The caller-supplied chat slot
//! lock is held for the whole sequence, so two concurrent writers to one
//! chat cannot mint the same id or double-evict.

use chrono::Utc;
use tracing::debug;

use riposte_types::error::MemoryError;
use riposte_types::exchange::{ChatId, ExchangeId, ExchangeRecord};
use riposte_types::stance::Stance;

use crate::chat::ChatSlot;
use crate::memory::store::ExchangeStore;

/// Maximum exchanges kept per chat.
pub const MEMORY_CAP: usize = 20;

/// Store a successful exchange and prune the chat back to `cap` records.
///
/// Increments the chat's sequence counter first, so ids stay strictly
/// increasing even across evictions. Eviction removes the lowest-sequence
/// records in one pass; on failure the already-written record stays put
/// and the error propagates.
pub async fn store_exchange<S: ExchangeStore>(
    store: &S,
    slot: &ChatSlot,
    chat_id: &ChatId,
    user_message: &str,
    persona: &str,
    stance: &Stance,
    response: &str,
    cap: usize,
) -> Result<ExchangeId, MemoryError> {
    let mut counter = slot.lock().await;
    *counter += 1;
    let seq = *counter;

    let record = ExchangeRecord {
        id: ExchangeId::new(chat_id, seq),
        user_message: user_message.to_string(),
        response: response.to_string(),
        persona: persona.to_string(),
        stance: stance.clone(),
        seq: seq as i64,
        created_at: Utc::now(),
    };
    store.add(chat_id, &record).await?;
    debug!(chat = %chat_id, id = %record.id, "stored exchange");

    let count = store.count(chat_id).await? as usize;
    if count > cap {
        let all = store.get_all(chat_id).await?;
        let oldest: Vec<ExchangeId> = all
            .iter()
            .take(count - cap)
            .map(|r| r.id.clone())
            .collect();
        store.delete(chat_id, &oldest).await?;
        debug!(chat = %chat_id, evicted = oldest.len(), "pruned old exchanges");
    }

    Ok(record.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatRegistry;
    use riposte_types::exchange::RecalledExchange;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store fake keeping records per chat, sorted by seq.
    #[derive(Default)]
    struct MemStore {
        records: Mutex<HashMap<ChatId, Vec<ExchangeRecord>>>,
    }

    impl MemStore {
        fn ids(&self, chat_id: &ChatId) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .get(chat_id)
                .map(|v| v.iter().map(|r| r.id.to_string()).collect())
                .unwrap_or_default()
        }
    }

    impl ExchangeStore for MemStore {
        async fn add(&self, chat_id: &ChatId, record: &ExchangeRecord) -> Result<(), MemoryError> {
            let mut records = self.records.lock().unwrap();
            let chat = records.entry(chat_id.clone()).or_default();
            chat.push(record.clone());
            chat.sort_by_key(|r| r.seq);
            Ok(())
        }

        async fn query(
            &self,
            _chat_id: &ChatId,
            _text: &str,
            _limit: usize,
        ) -> Result<Vec<RecalledExchange>, MemoryError> {
            Ok(Vec::new())
        }

        async fn get_all(&self, chat_id: &ChatId) -> Result<Vec<ExchangeRecord>, MemoryError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .get(chat_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn delete(&self, chat_id: &ChatId, ids: &[ExchangeId]) -> Result<(), MemoryError> {
            let mut records = self.records.lock().unwrap();
            if let Some(chat) = records.get_mut(chat_id) {
                chat.retain(|r| !ids.contains(&r.id));
            }
            Ok(())
        }

        async fn count(&self, chat_id: &ChatId) -> Result<u64, MemoryError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .get(chat_id)
                .map(|v| v.len() as u64)
                .unwrap_or(0))
        }

        async fn clear(&self, chat_id: &ChatId) -> Result<(), MemoryError> {
            self.records.lock().unwrap().remove(chat_id);
            Ok(())
        }
    }

    async fn write_n(store: &MemStore, registry: &ChatRegistry, chat_id: &ChatId, n: usize) {
        let slot = registry.require(chat_id).unwrap();
        for i in 0..n {
            store_exchange(
                store,
                &slot,
                chat_id,
                &format!("message {i}"),
                "The Strategist",
                &Stance::Agree,
                &format!("reply {i}"),
                MEMORY_CAP,
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemStore::default();
        let registry = ChatRegistry::default_set();
        let chat = ChatId::from("Timo");
        write_n(&store, &registry, &chat, 3).await;
        assert_eq!(store.ids(&chat), vec!["Timo_1", "Timo_2", "Timo_3"]);
    }

    #[tokio::test]
    async fn test_cap_evicts_oldest() {
        let store = MemStore::default();
        let registry = ChatRegistry::default_set();
        let chat = ChatId::from("Timo");
        write_n(&store, &registry, &chat, 25).await;

        let ids = store.ids(&chat);
        assert_eq!(ids.len(), MEMORY_CAP);
        assert_eq!(ids.first().unwrap(), "Timo_6");
        assert_eq!(ids.last().unwrap(), "Timo_25");
    }

    #[tokio::test]
    async fn test_count_is_min_of_writes_and_cap() {
        let store = MemStore::default();
        let registry = ChatRegistry::default_set();
        let chat = ChatId::from("Shark");
        write_n(&store, &registry, &chat, 7).await;
        assert_eq!(store.count(&chat).await.unwrap(), 7);

        write_n(&store, &registry, &chat, 30).await;
        assert_eq!(store.count(&chat).await.unwrap(), MEMORY_CAP as u64);
    }

    #[tokio::test]
    async fn test_sequence_survives_eviction() {
        let store = MemStore::default();
        let registry = ChatRegistry::default_set();
        let chat = ChatId::from("Timo");
        write_n(&store, &registry, &chat, 22).await;

        // Counter keeps climbing; ids never restart after eviction.
        let slot = registry.require(&chat).unwrap();
        assert_eq!(slot.current().await, 22);
        assert!(store.ids(&chat).contains(&"Timo_22".to_string()));
        assert!(!store.ids(&chat).contains(&"Timo_1".to_string()));
    }

    #[tokio::test]
    async fn test_record_metadata_reflects_request() {
        let store = MemStore::default();
        let registry = ChatRegistry::default_set();
        let chat = ChatId::from("Shark");
        let slot = registry.require(&chat).unwrap();

        store_exchange(
            &store,
            &slot,
            &chat,
            "Is cereal soup?",
            "The Orator",
            &Stance::Disagree,
            "A preposterous notion.",
            MEMORY_CAP,
        )
        .await
        .unwrap();

        let all = store.get_all(&chat).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].persona, "The Orator");
        assert_eq!(all[0].stance, Stance::Disagree);
        assert_eq!(all[0].user_message, "Is cereal soup?");
        assert_eq!(all[0].response, "A preposterous notion.");
    }
}
