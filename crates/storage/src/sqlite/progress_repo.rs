use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::warn;

use crate::repository::{ProgressRepository, StorageError};
use quiz_core::model::{Progress, QuestionId};

use super::{PROGRESS_KEY, SqliteProgressStore};

impl SqliteProgressStore {
    /// Fetch and parse the stored blob, treating anything unreadable as
    /// empty progress (fail-open, warn-and-continue).
    async fn load_blob(&self) -> Progress {
        let row = match sqlx::query("SELECT body FROM progress_blobs WHERE key = ?1")
            .bind(PROGRESS_KEY)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(row) => row,
            Err(err) => {
                warn!(error = %err, "failed to read progress blob; treating as empty");
                return Progress::default();
            }
        };

        let Some(row) = row else {
            return Progress::default();
        };

        let body: String = match row.try_get("body") {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "progress blob column unreadable; treating as empty");
                return Progress::default();
            }
        };

        match serde_json::from_str(&body) {
            Ok(progress) => progress,
            Err(err) => {
                warn!(error = %err, "corrupt progress blob discarded");
                Progress::default()
            }
        }
    }

    async fn store_blob(&self, progress: &Progress) -> Result<(), StorageError> {
        let body = serde_json::to_string(progress)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO progress_blobs (key, body, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            ",
        )
        .bind(PROGRESS_KEY)
        .bind(body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for SqliteProgressStore {
    async fn load(&self) -> Progress {
        self.load_blob().await
    }

    async fn record_outcome(
        &self,
        id: &QuestionId,
        correct: bool,
        answered_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        // Read-modify-write of the whole blob. No concurrent-writer
        // protection; last write wins.
        let mut progress = self.load_blob().await;
        progress.record(id.clone(), correct, answered_at);
        self.store_blob(&progress).await
    }

    async fn reset(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM progress_blobs WHERE key = ?1")
            .bind(PROGRESS_KEY)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
