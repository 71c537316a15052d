use errand_core::{Task, TaskResult};
use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};

use crate::queries::Queries;

/// Slot key holding the serialized task collection.
pub const TASKS_SLOT: &str = "TASKS";

/// Persistence gateway: the full task collection as one JSON array in a
/// local key-value slot. Every write overwrites the previous value; there
/// is no diffing and no schema versioning.
pub struct LocalStore {
    pub pool: SqlitePool,
}

impl LocalStore {
    pub async fn new(database_url: &str) -> TaskResult<Self> {
        // One connection keeps `:memory:` databases coherent; the slot
        // store never needs concurrent access.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn ensure_schema(&self) -> TaskResult<()> {
        sqlx::query(Queries::SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Serialize and store the whole collection under the fixed slot key.
    pub async fn save_tasks(&self, tasks: &[Task]) -> TaskResult<()> {
        let value = serde_json::to_string(tasks)?;

        sqlx::query(Queries::UPSERT_SLOT)
            .bind(TASKS_SLOT)
            .bind(&value)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        tracing::debug!(count = tasks.len(), "persisted task collection");
        Ok(())
    }

    /// Read the stored collection. A missing slot or unreadable JSON is
    /// treated as "no stored data", never as a fatal error.
    pub async fn load_tasks(&self) -> TaskResult<Vec<Task>> {
        let row = sqlx::query(Queries::GET_SLOT)
            .bind(TASKS_SLOT)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            tracing::debug!("no stored task collection");
            return Ok(Vec::new());
        };

        let value: String = row.try_get("value")?;
        match serde_json::from_str(&value) {
            Ok(tasks) => Ok(tasks),
            Err(e) => {
                tracing::warn!(error = %e, "stored task collection is unreadable, starting empty");
                Ok(Vec::new())
            }
        }
    }
}
