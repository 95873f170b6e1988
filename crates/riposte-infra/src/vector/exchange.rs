//! LanceDB-backed exchange store for per-chat conversation memory.
//!
//! Implements `ExchangeStore` from `riposte-core` using LanceDB for vector
//! storage and similarity search. Each chat gets an isolated table
//! (`chat_exchanges_{chat_id}`) holding one row per exchange, keyed by a
//! 384-dimensional BGESmallENV15 embedding of the user message.

use std::sync::Arc;

use arrow_array::{
    Array, FixedSizeListArray, Float32Array, Int64Array, RecordBatch, RecordBatchIterator,
    StringArray,
};
use arrow_schema::{DataType, Field};
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};

use riposte_core::memory::embedder::Embedder;
use riposte_core::memory::store::ExchangeStore;
use riposte_types::error::MemoryError;
use riposte_types::exchange::{ChatId, ExchangeId, ExchangeRecord, RecalledExchange};
use riposte_types::stance::Stance;

use super::lance::LanceDb;
use super::schema::{EMBEDDING_DIMENSION, exchange_schema};

/// LanceDB-backed exchange store.
///
/// Wraps a [`LanceDb`] connection and an embedder. The user message is the
/// embedded document; cosine distance ranks retrieval.
pub struct LanceExchangeStore<E> {
    db: LanceDb,
    embedder: E,
}

impl<E: Embedder> LanceExchangeStore<E> {
    /// Create a new exchange store over the given database and embedder.
    pub fn new(db: LanceDb, embedder: E) -> Self {
        Self { db, embedder }
    }

    /// Ensure the chat's exchange table exists, creating it if needed.
    async fn ensure_chat_table(&self, chat_id: &ChatId) -> Result<lancedb::Table, MemoryError> {
        let table_name = LanceDb::chat_table_name(chat_id);
        let schema = Arc::new(exchange_schema());
        self.db
            .ensure_table(&table_name, schema)
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to ensure chat table: {e}")))
    }

    /// Embed a single text, returning its vector.
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        let mut vectors = self.embedder.embed(&[text.to_string()]).await?;
        if vectors.is_empty() {
            return Err(MemoryError::Embedding(
                "embedder returned no vectors".to_string(),
            ));
        }
        Ok(vectors.remove(0))
    }
}

/// Build an Arrow RecordBatch from an ExchangeRecord and its embedding.
fn build_record_batch(
    record: &ExchangeRecord,
    embedding: &[f32],
) -> Result<RecordBatch, MemoryError> {
    let schema = Arc::new(exchange_schema());

    let id_array = StringArray::from(vec![record.id.to_string()]);
    let user_message_array = StringArray::from(vec![record.user_message.clone()]);
    let response_array = StringArray::from(vec![record.response.clone()]);
    let persona_array = StringArray::from(vec![record.persona.clone()]);
    let stance_array = StringArray::from(vec![String::from(record.stance.clone())]);
    let seq_array = Int64Array::from(vec![record.seq]);
    let created_at_array = StringArray::from(vec![record.created_at.to_rfc3339()]);

    // Build FixedSizeList vector column
    let values = Float32Array::from(embedding.to_vec());
    let field = Arc::new(Field::new("item", DataType::Float32, true));
    let vector_array = FixedSizeListArray::new(field, EMBEDDING_DIMENSION, Arc::new(values), None);

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(id_array),
            Arc::new(user_message_array),
            Arc::new(response_array),
            Arc::new(persona_array),
            Arc::new(stance_array),
            Arc::new(seq_array),
            Arc::new(created_at_array),
            Arc::new(vector_array),
        ],
    )
    .map_err(|e| MemoryError::Store(format!("Failed to build record batch: {e}")))
}

/// Parse Arrow RecordBatch rows into ExchangeRecord values.
///
/// Extracts all columns by index from the batch and reconstructs domain
/// objects. Skips the vector column (used only for search).
fn record_batch_to_records(batch: &RecordBatch) -> Vec<ExchangeRecord> {
    let num_rows = batch.num_rows();
    if num_rows == 0 {
        return vec![];
    }

    let id_col = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("id column should be StringArray");
    let user_message_col = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("user_message column should be StringArray");
    let response_col = batch
        .column(2)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("response column should be StringArray");
    let persona_col = batch
        .column(3)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("persona column should be StringArray");
    let stance_col = batch
        .column(4)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("stance column should be StringArray");
    let seq_col = batch
        .column(5)
        .as_any()
        .downcast_ref::<Int64Array>()
        .expect("seq column should be Int64Array");
    let created_at_col = batch
        .column(6)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("created_at column should be StringArray");

    let mut records = Vec::with_capacity(num_rows);

    for i in 0..num_rows {
        let created_at = DateTime::parse_from_rfc3339(created_at_col.value(i))
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        records.push(ExchangeRecord {
            id: ExchangeId::from(id_col.value(i).to_string()),
            user_message: user_message_col.value(i).to_string(),
            response: response_col.value(i).to_string(),
            persona: persona_col.value(i).to_string(),
            stance: Stance::from(stance_col.value(i).to_string()),
            seq: seq_col.value(i),
            created_at,
        });
    }

    records
}

impl<E: Embedder> ExchangeStore for LanceExchangeStore<E> {
    async fn add(&self, chat_id: &ChatId, record: &ExchangeRecord) -> Result<(), MemoryError> {
        let embedding = self.embed_one(&record.user_message).await?;
        let table = self.ensure_chat_table(chat_id).await?;

        let batch = build_record_batch(record, &embedding)?;
        let schema = batch.schema();

        let reader = RecordBatchIterator::new(vec![Ok(batch)], schema);

        table
            .add(reader)
            .execute()
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to add exchange: {e}")))?;

        Ok(())
    }

    async fn query(
        &self,
        chat_id: &ChatId,
        text: &str,
        limit: usize,
    ) -> Result<Vec<RecalledExchange>, MemoryError> {
        let table_name = LanceDb::chat_table_name(chat_id);
        if !self.db.table_exists(&table_name).await {
            return Ok(Vec::new());
        }

        let embedding = self.embed_one(text).await?;
        let table = self.ensure_chat_table(chat_id).await?;

        let results = table
            .vector_search(embedding.as_slice())
            .map_err(|e| MemoryError::Store(format!("Vector search setup failed: {e}")))?
            .distance_type(lancedb::DistanceType::Cosine)
            .limit(limit)
            .execute()
            .await
            .map_err(|e| MemoryError::Store(format!("Vector search failed: {e}")))?;

        let batches: Vec<RecordBatch> = results
            .try_collect()
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to collect results: {e}")))?;

        let mut recalled: Vec<RecalledExchange> = Vec::new();

        for batch in &batches {
            if batch.num_rows() == 0 {
                continue;
            }

            // The _distance column is added by LanceDB vector search
            let distance_col = batch
                .column_by_name("_distance")
                .and_then(|c| c.as_any().downcast_ref::<Float32Array>());

            let records = record_batch_to_records(batch);

            for (i, record) in records.into_iter().enumerate() {
                let distance = distance_col.map_or(0.0, |d| d.value(i));
                recalled.push(RecalledExchange {
                    user_message: record.user_message,
                    response: record.response,
                    persona: record.persona,
                    distance,
                });
            }
        }

        // Nearest first, regardless of batch boundaries
        recalled.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        recalled.truncate(limit);

        Ok(recalled)
    }

    async fn get_all(&self, chat_id: &ChatId) -> Result<Vec<ExchangeRecord>, MemoryError> {
        let table_name = LanceDb::chat_table_name(chat_id);
        if !self.db.table_exists(&table_name).await {
            return Ok(Vec::new());
        }

        let table = self.ensure_chat_table(chat_id).await?;

        let results = table
            .query()
            .execute()
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to scan exchanges: {e}")))?;

        let batches: Vec<RecordBatch> = results
            .try_collect()
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to collect scan results: {e}")))?;

        let mut records: Vec<ExchangeRecord> =
            batches.iter().flat_map(record_batch_to_records).collect();

        // Oldest first; the engine's iteration order is not trusted
        records.sort_by_key(|r| r.seq);

        Ok(records)
    }

    async fn delete(&self, chat_id: &ChatId, ids: &[ExchangeId]) -> Result<(), MemoryError> {
        if ids.is_empty() {
            return Ok(());
        }

        let table = self.ensure_chat_table(chat_id).await?;

        let id_list = ids
            .iter()
            .map(|id| format!("'{id}'"))
            .collect::<Vec<_>>()
            .join(", ");

        table
            .delete(&format!("id IN ({id_list})"))
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to delete exchanges: {e}")))?;

        Ok(())
    }

    async fn count(&self, chat_id: &ChatId) -> Result<u64, MemoryError> {
        let table_name = LanceDb::chat_table_name(chat_id);
        if !self.db.table_exists(&table_name).await {
            return Ok(0);
        }

        let table = self.ensure_chat_table(chat_id).await?;
        let count = table
            .count_rows(None)
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to count rows: {e}")))?;

        Ok(count as u64)
    }

    async fn clear(&self, chat_id: &ChatId) -> Result<(), MemoryError> {
        let table_name = LanceDb::chat_table_name(chat_id);
        self.db
            .drop_table(&table_name)
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to drop chat table: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    /// Deterministic embedder for tests: hashes the text into a seed and
    /// produces a distinct but reproducible unit vector.
    struct HashEmbedder;

    fn seeded_embedding(seed: f32) -> Vec<f32> {
        let mut vec = vec![0.0_f32; EMBEDDING_DIMENSION as usize];
        for (i, val) in vec.iter_mut().enumerate() {
            *val = ((i as f32 + seed) * 0.01).sin();
        }
        // Normalize to unit length for cosine similarity
        let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for val in vec.iter_mut() {
                *val /= norm;
            }
        }
        vec
    }

    impl Embedder for HashEmbedder {
        async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
            Ok(texts
                .iter()
                .map(|text| {
                    let mut hasher = DefaultHasher::new();
                    text.hash(&mut hasher);
                    seeded_embedding((hasher.finish() % 1000) as f32)
                })
                .collect())
        }

        fn model_name(&self) -> &str {
            "test-hash"
        }

        fn dimension(&self) -> usize {
            EMBEDDING_DIMENSION as usize
        }
    }

    async fn setup_store() -> (LanceExchangeStore<HashEmbedder>, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = LanceDb::new(temp_dir.path().to_path_buf())
            .await
            .expect("Failed to create database");
        (LanceExchangeStore::new(db, HashEmbedder), temp_dir)
    }

    fn make_record(chat: &ChatId, seq: u64, user_message: &str, response: &str) -> ExchangeRecord {
        ExchangeRecord {
            id: ExchangeId::new(chat, seq),
            user_message: user_message.to_string(),
            response: response.to_string(),
            persona: "The Strategist".to_string(),
            stance: Stance::Agree,
            seq: seq as i64,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_and_count() {
        let (store, _tmp) = setup_store().await;
        let chat = ChatId::new("Timo");

        assert_eq!(store.count(&chat).await.unwrap(), 0);

        let record = make_record(&chat, 1, "you free tonight?", "Depends who's asking.");
        store.add(&chat, &record).await.unwrap();
        assert_eq!(store.count(&chat).await.unwrap(), 1);

        let record2 = make_record(&chat, 2, "movie later?", "Only if I pick.");
        store.add(&chat, &record2).await.unwrap();
        assert_eq!(store.count(&chat).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_query_returns_nearest_first() {
        let (store, _tmp) = setup_store().await;
        let chat = ChatId::new("Timo");

        store
            .add(&chat, &make_record(&chat, 1, "you free tonight?", "Maybe."))
            .await
            .unwrap();
        store
            .add(&chat, &make_record(&chat, 2, "did you watch the game?", "Every minute."))
            .await
            .unwrap();
        store
            .add(&chat, &make_record(&chat, 3, "lunch tomorrow?", "Sure thing."))
            .await
            .unwrap();

        // Querying with an exact stored message must rank it first
        let results = store
            .query(&chat, "did you watch the game?", 2)
            .await
            .unwrap();

        assert!(!results.is_empty());
        assert!(results.len() <= 2);
        assert_eq!(results[0].user_message, "did you watch the game?");
        assert_eq!(results[0].response, "Every minute.");
        assert!(results[0].distance < 0.01, "exact match should have near-zero distance");

        for window in results.windows(2) {
            assert!(
                window[0].distance <= window[1].distance + f32::EPSILON,
                "Results should be sorted nearest first"
            );
        }
    }

    #[tokio::test]
    async fn test_query_missing_table_returns_empty() {
        let (store, _tmp) = setup_store().await;
        let chat = ChatId::new("Timo");

        let results = store.query(&chat, "anything", 3).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_sorted_by_seq() {
        let (store, _tmp) = setup_store().await;
        let chat = ChatId::new("Timo");

        // Insert out of order; get_all must still return ascending seq
        store
            .add(&chat, &make_record(&chat, 2, "second", "two"))
            .await
            .unwrap();
        store
            .add(&chat, &make_record(&chat, 1, "first", "one"))
            .await
            .unwrap();
        store
            .add(&chat, &make_record(&chat, 3, "third", "three"))
            .await
            .unwrap();

        let all = store.get_all(&chat).await.unwrap();
        let seqs: Vec<i64> = all.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(all[0].id.as_str(), "Timo_1");
        assert_eq!(all[2].id.as_str(), "Timo_3");
    }

    #[tokio::test]
    async fn test_get_all_missing_table_returns_empty() {
        let (store, _tmp) = setup_store().await;
        let chat = ChatId::new("Shark");

        let all = store.get_all(&chat).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_ids() {
        let (store, _tmp) = setup_store().await;
        let chat = ChatId::new("Timo");

        for seq in 1..=3 {
            store
                .add(&chat, &make_record(&chat, seq, &format!("message {seq}"), "ok"))
                .await
                .unwrap();
        }

        let oldest = vec![ExchangeId::new(&chat, 1), ExchangeId::new(&chat, 2)];
        store.delete(&chat, &oldest).await.unwrap();

        assert_eq!(store.count(&chat).await.unwrap(), 1);
        let remaining = store.get_all(&chat).await.unwrap();
        assert_eq!(remaining[0].id.as_str(), "Timo_3");
    }

    #[tokio::test]
    async fn test_delete_empty_ids_is_noop() {
        let (store, _tmp) = setup_store().await;
        let chat = ChatId::new("Timo");

        store
            .add(&chat, &make_record(&chat, 1, "hello", "hi"))
            .await
            .unwrap();
        store.delete(&chat, &[]).await.unwrap();
        assert_eq!(store.count(&chat).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_idempotent() {
        let (store, _tmp) = setup_store().await;
        let chat = ChatId::new("Timo");

        store
            .add(&chat, &make_record(&chat, 1, "hello", "hi"))
            .await
            .unwrap();
        assert_eq!(store.count(&chat).await.unwrap(), 1);

        store.clear(&chat).await.unwrap();
        assert_eq!(store.count(&chat).await.unwrap(), 0);

        // Clearing again, and clearing a never-written chat, both succeed
        store.clear(&chat).await.unwrap();
        store.clear(&ChatId::new("Shark")).await.unwrap();
    }

    #[tokio::test]
    async fn test_chat_isolation() {
        let (store, _tmp) = setup_store().await;
        let timo = ChatId::new("Timo");
        let shark = ChatId::new("Shark");

        store
            .add(&timo, &make_record(&timo, 1, "timo message", "timo reply"))
            .await
            .unwrap();
        store
            .add(&shark, &make_record(&shark, 1, "shark message", "shark reply"))
            .await
            .unwrap();

        assert_eq!(store.count(&timo).await.unwrap(), 1);
        assert_eq!(store.count(&shark).await.unwrap(), 1);

        let timo_all = store.get_all(&timo).await.unwrap();
        assert_eq!(timo_all.len(), 1);
        assert_eq!(timo_all[0].user_message, "timo message");

        store.clear(&timo).await.unwrap();
        assert_eq!(store.count(&timo).await.unwrap(), 0);
        assert_eq!(store.count(&shark).await.unwrap(), 1);
    }

    #[test]
    fn test_record_batch_roundtrip() {
        let chat = ChatId::new("Shark");
        let record = ExchangeRecord {
            id: ExchangeId::new(&chat, 7),
            user_message: "are you in or out?".to_string(),
            response: "Out. Obviously.".to_string(),
            persona: "The Rebel".to_string(),
            stance: Stance::Disagree,
            seq: 7,
            created_at: Utc::now(),
        };

        let embedding = seeded_embedding(42.0);
        let batch = build_record_batch(&record, &embedding).unwrap();

        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.num_columns(), 8);

        let records = record_batch_to_records(&batch);
        assert_eq!(records.len(), 1);

        let recovered = &records[0];
        assert_eq!(recovered.id, record.id);
        assert_eq!(recovered.user_message, record.user_message);
        assert_eq!(recovered.response, record.response);
        assert_eq!(recovered.persona, record.persona);
        assert_eq!(recovered.stance, record.stance);
        assert_eq!(recovered.seq, record.seq);
        assert_eq!(recovered.created_at, record.created_at);
    }
}
