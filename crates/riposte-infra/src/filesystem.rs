//! Filesystem layout helpers for Riposte.
//!
//! The data directory holds `riposte.toml` and the LanceDB vector store.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `RIPOSTE_DATA_DIR` environment variable
/// 2. `~/.riposte` (home directory)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("RIPOSTE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".riposte");
    }

    // Last resort: current directory
    PathBuf::from(".riposte")
}

/// Compute the vector store path: `{data_dir}/vector_store`.
pub fn vector_store_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("vector_store")
}
