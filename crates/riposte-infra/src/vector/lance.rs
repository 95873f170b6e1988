//! LanceDB connection wrapper for table lifecycle management.
//!
//! Provides `LanceDb` which wraps a `lancedb::Connection` and offers helper
//! methods for table lifecycle (create, open, drop) using Arrow schemas.
//!
//! This is connection plumbing only. The `ExchangeStore` implementation
//! lives in `vector::exchange`.

use std::path::PathBuf;
use std::sync::Arc;

use arrow_schema::Schema;

use riposte_types::exchange::ChatId;

/// LanceDB connection wrapper for table management.
///
/// Manages a single LanceDB connection at a filesystem path. Each chat
/// gets its own exchange table (`chat_exchanges_{chat_id}`).
pub struct LanceDb {
    db: lancedb::Connection,
}

impl LanceDb {
    /// Open or create a LanceDB database at the given path.
    ///
    /// Creates the directory if it does not exist.
    /// Default path: `~/.riposte/vector_store`
    pub async fn new(base_path: PathBuf) -> Result<Self, lancedb::Error> {
        // Ensure directory exists
        std::fs::create_dir_all(&base_path).map_err(|e| lancedb::Error::CreateDir {
            path: base_path.display().to_string(),
            source: e,
        })?;

        let uri = base_path
            .to_str()
            .ok_or_else(|| lancedb::Error::InvalidInput {
                message: format!("Path contains invalid UTF-8: {}", base_path.display()),
            })?;

        let db = lancedb::connect(uri).execute().await?;

        Ok(Self { db })
    }

    /// Ensure a table exists with the given schema.
    ///
    /// If the table already exists, opens it. If not, creates an empty table
    /// with the provided schema.
    pub async fn ensure_table(
        &self,
        table_name: &str,
        schema: Arc<Schema>,
    ) -> Result<lancedb::Table, lancedb::Error> {
        match self.db.open_table(table_name).execute().await {
            Ok(table) => Ok(table),
            Err(lancedb::Error::TableNotFound { .. }) => {
                self.db
                    .create_empty_table(table_name, schema)
                    .execute()
                    .await
            }
            Err(e) => Err(e),
        }
    }

    /// Check if a table exists in the database.
    pub async fn table_exists(&self, table_name: &str) -> bool {
        self.db.open_table(table_name).execute().await.is_ok()
    }

    /// Drop a table from the database.
    ///
    /// Returns Ok(()) even if the table does not exist (idempotent).
    pub async fn drop_table(&self, table_name: &str) -> Result<(), lancedb::Error> {
        match self.db.drop_table(table_name, &[]).await {
            Ok(()) => Ok(()),
            Err(lancedb::Error::TableNotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Generate the table name for a chat's exchange table.
    pub fn chat_table_name(chat_id: &ChatId) -> String {
        format!("chat_exchanges_{chat_id}")
    }
}
