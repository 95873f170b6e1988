//! Arrow schema definitions for LanceDB exchange tables.
//!
//! Each chat thread has its own table holding one row per stored exchange,
//! with a 384-dimensional float32 vector field for BGESmallENV15 embeddings.
//!
//! Arrow versions MUST match lancedb's transitive dependency (57.3 for lancedb 0.26).

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// BGESmallENV15 embedding dimension.
pub const EMBEDDING_DIMENSION: i32 = 384;

/// Schema for per-chat exchange tables in LanceDB.
///
/// Each chat has its own table named `chat_exchanges_{chat_id}`. The user
/// message is the embedded document; the reply and request metadata ride
/// along as payload columns.
pub fn exchange_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new("user_message", DataType::Utf8, false),
        Field::new("response", DataType::Utf8, false),
        Field::new("persona", DataType::Utf8, false),
        Field::new("stance", DataType::Utf8, false),
        Field::new("seq", DataType::Int64, false),
        Field::new("created_at", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, true)),
                EMBEDDING_DIMENSION,
            ),
            false,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_schema_has_correct_fields() {
        let schema = exchange_schema();
        assert_eq!(schema.fields().len(), 8);
        assert!(schema.field_with_name("id").is_ok());
        assert!(schema.field_with_name("user_message").is_ok());
        assert!(schema.field_with_name("response").is_ok());
        assert!(schema.field_with_name("seq").is_ok());
        assert!(schema.field_with_name("vector").is_ok());

        let vector_field = schema.field_with_name("vector").unwrap();
        match vector_field.data_type() {
            DataType::FixedSizeList(_, size) => assert_eq!(*size, EMBEDDING_DIMENSION),
            other => panic!("Expected FixedSizeList, got {:?}", other),
        }
    }

    #[test]
    fn test_embedding_dimension_constant() {
        assert_eq!(EMBEDDING_DIMENSION, 384);
    }
}
