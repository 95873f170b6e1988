//! Application state wiring all services together.
//!
//! AppState holds the concrete reply service used by both the CLI and the
//! HTTP handlers. The service is generic over store/generator traits, but
//! AppState pins them to the LanceDB + Gemini implementations.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use riposte_core::chat::ChatRegistry;
use riposte_core::persona::PersonaRegistry;
use riposte_core::service::reply::ReplyService;
use riposte_infra::config::load_config;
use riposte_infra::filesystem::{resolve_data_dir, vector_store_dir};
use riposte_infra::gemini::GeminiClient;
use riposte_infra::secret::gemini_api_key;
use riposte_infra::vector::embedder::FastembedEmbedder;
use riposte_infra::vector::exchange::LanceExchangeStore;
use riposte_infra::vector::lance::LanceDb;
use riposte_types::config::RiposteConfig;
use riposte_types::exchange::ChatId;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteExchangeStore = LanceExchangeStore<FastembedEmbedder>;
pub type ConcreteReplyService = ReplyService<ConcreteExchangeStore, GeminiClient>;

/// Shared application state.
///
/// Used by both CLI commands and HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ConcreteReplyService>,
    /// Whether `GEMINI_API_KEY` was set at startup. The generate endpoint
    /// refuses requests when it was not; everything else still works.
    pub api_key_present: bool,
    pub config: RiposteConfig,
    pub data_dir: PathBuf,
    /// Directory holding `index.html` for `GET /`.
    pub web_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: data dir, config, store, client.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        // Exchange store: LanceDB tables over locally computed embeddings.
        // The embedding model is downloaded into {data_dir}/models on first
        // use and cached there.
        let db = LanceDb::new(vector_store_dir(&data_dir)).await?;
        let embedder = FastembedEmbedder::new(data_dir.join("models"))?;
        let store = LanceExchangeStore::new(db, embedder);

        // The client is built with an empty key when none is configured;
        // the generate endpoint checks api_key_present before calling it.
        let api_key = gemini_api_key();
        let api_key_present = api_key.is_some();
        let generator = GeminiClient::new(
            api_key.unwrap_or_else(|| SecretString::from(String::new())),
            config.generation.model.clone(),
        );

        let personas = PersonaRegistry::builtin();
        let chats = ChatRegistry::new(config.memory.chats.iter().cloned().map(ChatId::from));

        let service = ReplyService::new(
            Arc::new(store),
            Arc::new(generator),
            Arc::new(personas),
            chats,
            config.memory.top_k,
            config.memory.max_records,
        );

        let web_dir = PathBuf::from(&config.web.dir);

        Ok(Self {
            service: Arc::new(service),
            api_key_present,
            config,
            data_dir,
            web_dir,
        })
    }
}
