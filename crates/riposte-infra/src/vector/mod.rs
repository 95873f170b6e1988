//! Vector database infrastructure for exchange memory.
//!
//! Provides LanceDB store management and fastembed-based local embedding
//! generation. Arrow schemas define the table structures.

pub mod embedder;
pub mod exchange;
pub mod lance;
pub mod schema;
