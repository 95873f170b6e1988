//! Service configuration types for Riposte.
//!
//! `RiposteConfig` represents the top-level `riposte.toml` that controls
//! the bind address, generation model, memory tuning, and static asset
//! directory.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Riposte service.
///
/// Loaded from `{data_dir}/riposte.toml`. All fields have sensible defaults,
/// so an absent or partial file is fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiposteConfig {
    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream generation model settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Exchange memory tuning.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Static asset serving.
    #[serde(default)]
    pub web: WebConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind (default 5000).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream generation model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier sent to the provider (default `gemini-2.5-flash`).
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

/// Exchange memory tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// The chat threads the service accepts (default `["Timo", "Shark"]`).
    #[serde(default = "default_chats")]
    pub chats: Vec<String>,

    /// Per-chat record cap; oldest exchanges are evicted beyond this
    /// (default 20).
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// How many past exchanges to retrieve per message (default 3).
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_chats() -> Vec<String> {
    vec!["Timo".to_string(), "Shark".to_string()]
}

fn default_max_records() -> usize {
    20
}

fn default_top_k() -> usize {
    3
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            chats: default_chats(),
            max_records: default_max_records(),
            top_k: default_top_k(),
        }
    }
}

/// Static asset serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Directory holding `index.html` (default `web`, relative to the
    /// working directory).
    #[serde(default = "default_web_dir")]
    pub dir: String,
}

fn default_web_dir() -> String {
    "web".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            dir: default_web_dir(),
        }
    }
}
