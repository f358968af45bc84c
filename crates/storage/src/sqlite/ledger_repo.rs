use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use tutor_core::model::CompletionLedger;

use crate::repository::{LEDGER_STORAGE_KEY, LedgerRepository, StorageError, parse_payload};

use super::SqliteRepository;

#[async_trait]
impl LedgerRepository for SqliteRepository {
    async fn load_ledger(&self) -> Result<Option<CompletionLedger>, StorageError> {
        let row = sqlx::query("SELECT value FROM local_state WHERE key = ?1")
            .bind(LEDGER_STORAGE_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let payload: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        parse_payload(&payload).map(Some)
    }

    async fn save_ledger(&self, ledger: &CompletionLedger) -> Result<(), StorageError> {
        self.write_raw_ledger(&ledger.to_json()).await
    }

    async fn clear_ledger(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_state WHERE key = ?1")
            .bind(LEDGER_STORAGE_KEY)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}

impl SqliteRepository {
    /// Write an arbitrary payload under the ledger key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the write fails.
    pub async fn write_raw_ledger(&self, payload: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO local_state (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(LEDGER_STORAGE_KEY)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
