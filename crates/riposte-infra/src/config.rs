//! Service configuration loader for Riposte.
//!
//! Reads `riposte.toml` from the data directory (`~/.riposte/` in
//! production) and deserializes it into [`RiposteConfig`]. Falls back to
//! defaults when the file is missing or malformed.

use std::path::Path;

use riposte_types::config::RiposteConfig;

/// Load service configuration from `{data_dir}/riposte.toml`.
///
/// - If the file does not exist, returns [`RiposteConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> RiposteConfig {
    let config_path = data_dir.join("riposte.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No riposte.toml found at {}, using defaults",
                config_path.display()
            );
            return RiposteConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return RiposteConfig::default();
        }
    };

    match toml::from_str::<RiposteConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RiposteConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.memory.chats, vec!["Timo", "Shark"]);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("riposte.toml");
        tokio::fs::write(
            &config_path,
            r#"
[server]
port = 8080

[generation]
model = "gemini-2.5-pro"

[memory]
top_k = 5
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert_eq!(config.memory.top_k, 5);
        // Unspecified fields keep defaults
        assert_eq!(config.memory.max_records, 20);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("riposte.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.generation.model, "gemini-2.5-flash");
    }
}
