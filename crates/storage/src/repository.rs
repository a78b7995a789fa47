use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{Progress, QuestionId};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence contract for answer progress.
///
/// The whole progress mapping is stored as one blob under one well-known
/// key, read-modify-written on every outcome (single-user, single-writer by
/// design; concurrent writers race with last-write-wins).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the persisted progress.
    ///
    /// Fail-open by contract: absent, empty, or unreadable persisted content
    /// yields an empty `Progress`. Adapters log the discard at warn level and
    /// never surface it.
    async fn load(&self) -> Progress;

    /// Upsert the outcome for one question and persist the full mapping.
    ///
    /// Re-answering a question overwrites its prior record (no history).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated mapping cannot be persisted.
    async fn record_outcome(
        &self,
        id: &QuestionId,
        correct: bool,
        answered_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Delete all persisted progress unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the deletion fails.
    async fn reset(&self) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// In-memory progress store for tests and the ephemeral (no persistence)
/// mode, which is exactly this store starting empty.
#[derive(Clone, Default)]
pub struct InMemoryProgressStore {
    inner: Arc<Mutex<Progress>>,
}

impl InMemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store, used by tests.
    #[must_use]
    pub fn with_progress(progress: Progress) -> Self {
        Self {
            inner: Arc::new(Mutex::new(progress)),
        }
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressStore {
    async fn load(&self) -> Progress {
        self.inner.lock().map(|g| g.clone()).unwrap_or_default()
    }

    async fn record_outcome(
        &self,
        id: &QuestionId,
        correct: bool,
        answered_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.record(id.clone(), correct, answered_at);
        Ok(())
    }

    async fn reset(&self) -> Result<(), StorageError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Progress::default();
        Ok(())
    }
}

//
// ─── STORAGE AGGREGATE ─────────────────────────────────────────────────────────
//

/// Aggregates the progress repository behind a trait object so the backend
/// can be swapped between SQLite and in-memory at composition time.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            progress: Arc::new(InMemoryProgressStore::new()),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[tokio::test]
    async fn fresh_store_loads_empty() {
        let store = InMemoryProgressStore::new();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn record_then_load_round_trips() {
        let store = InMemoryProgressStore::new();
        store
            .record_outcome(&QuestionId::new("q1"), true, fixed_now())
            .await
            .unwrap();

        let progress = store.load().await;
        assert_eq!(progress.answered_count(), 1);
        assert!(progress.outcome(&QuestionId::new("q1")).unwrap().correct);
    }

    #[tokio::test]
    async fn re_recording_overwrites_last_write_wins() {
        let store = InMemoryProgressStore::new();
        let id = QuestionId::new("q1");
        store.record_outcome(&id, true, fixed_now()).await.unwrap();
        store.record_outcome(&id, false, fixed_now()).await.unwrap();

        let progress = store.load().await;
        assert_eq!(progress.answered_count(), 1);
        assert!(!progress.outcome(&id).unwrap().correct);
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let store = InMemoryProgressStore::new();
        store
            .record_outcome(&QuestionId::new("q1"), true, fixed_now())
            .await
            .unwrap();
        store.reset().await.unwrap();
        assert!(store.load().await.is_empty());
    }

    #[test]
    fn storage_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Storage>();
        assert_send_sync::<InMemoryProgressStore>();
    }
}
