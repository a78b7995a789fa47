use std::sync::Arc;

use quiz_core::model::Dataset;
use quiz_core::stats::{StatsReport, compute_report};
use storage::repository::ProgressRepository;

use crate::error::QuizServiceError;

/// Read side of the progress store: recomputes the report on demand.
///
/// Pull model; nothing is cached or persisted, so a report is always
/// consistent with the progress blob at the moment of the call.
pub struct StatsService {
    dataset: Arc<Dataset>,
    progress: Arc<dyn ProgressRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { dataset, progress }
    }

    /// Fresh aggregate + grouped report.
    pub async fn report(&self) -> StatsReport {
        let progress = self.progress.load().await;
        compute_report(&self.dataset, &progress)
    }

    /// User-confirmed, irreversible progress reset.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the deletion fails.
    pub async fn reset(&self) -> Result<(), QuizServiceError> {
        self.progress.reset().await?;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
