//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `riposte-core` using fastembed's
//! BGESmallENV15 model (384 dimensions) with ONNX runtime inference.
//!
//! Inference is CPU-bound, so embedding runs on the blocking thread pool;
//! a mutex serialises access to the ONNX session.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use riposte_core::memory::embedder::Embedder;
use riposte_types::error::MemoryError;

use super::schema::EMBEDDING_DIMENSION;

/// Model name recorded for stored vectors.
pub const MODEL_NAME: &str = "BAAI/bge-small-en-v1.5";

/// Local embedding generator backed by fastembed.
pub struct FastembedEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
}

impl FastembedEmbedder {
    /// Load the BGESmallENV15 model, downloading weights into `cache_dir`
    /// on first use.
    pub fn new(cache_dir: PathBuf) -> Result<Self, MemoryError> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::BGESmallENV15)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(false),
        )
        .map_err(|e| MemoryError::Embedding(format!("failed to load embedding model: {e}")))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
        })
    }
}

impl Embedder for FastembedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let batch: Vec<String> = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            model
                .lock()
                .map_err(|_| MemoryError::Embedding("embedding model lock poisoned".to_string()))?
                .embed(batch, None)
                .map_err(|e| MemoryError::Embedding(format!("embedding failed: {e}")))
        })
        .await
        .map_err(|e| MemoryError::Embedding(format!("embedding task failed: {e}")))?
    }

    fn model_name(&self) -> &str {
        MODEL_NAME
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION as usize
    }
}
