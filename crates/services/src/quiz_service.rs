use std::sync::Arc;

use tracing::debug;

use quiz_core::model::{Dataset, OptionLabel, QuestionId, QuestionItem};
use quiz_core::session::{ItemPicker, QuizSession, Reveal, SessionState, Submission};
use quiz_core::time::Clock;
use storage::repository::ProgressRepository;

use crate::error::QuizServiceError;
use crate::picker::RandomPicker;

/// Drives the quiz session: selects unanswered questions, scores
/// submissions, and persists outcomes.
///
/// The session state machine itself lives in `quiz-core`; this service owns
/// one instance of it plus the dataset, the progress store, the clock, and
/// the random source.
pub struct QuizService {
    dataset: Arc<Dataset>,
    progress: Arc<dyn ProgressRepository>,
    clock: Clock,
    picker: Box<dyn ItemPicker + Send>,
    session: QuizSession,
}

impl QuizService {
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self {
            dataset,
            progress,
            clock: Clock::default_clock(),
            picker: Box::new(RandomPicker::new()),
            session: QuizSession::new(),
        }
    }

    /// Override the clock (usually for deterministic testing).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Override the random source (seeded or scripted selection).
    #[must_use]
    pub fn with_picker(mut self, picker: Box<dyn ItemPicker + Send>) -> Self {
        self.picker = picker;
        self
    }

    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&QuestionItem> {
        self.session.current_item()
    }

    #[must_use]
    pub fn reveal(&self) -> Option<&Reveal> {
        self.session.reveal()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.session.is_exhausted()
    }

    /// Report text of the current item, or the placeholder when absent.
    #[must_use]
    pub fn report_text(&self) -> Option<&str> {
        self.session.report_text()
    }

    /// Select the next unanswered question against a fresh progress snapshot.
    ///
    /// Returns the presented item, or `None` when the session is idle (empty
    /// dataset) or exhausted.
    pub async fn next_question(&mut self) -> Option<QuestionItem> {
        let progress = self.progress.load().await;
        self.session
            .select_next(&self.dataset, &progress, self.picker.as_mut())
            .cloned()
    }

    /// Score a submission for the current question and persist the outcome.
    ///
    /// A repeat submission for an already-revealed question is a no-op that
    /// returns the existing reveal. If persisting fails, the session rolls
    /// back to the unanswered presentation so the attempt is not
    /// half-applied.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` for invalid labels or a missing
    /// current item, and `QuizServiceError::Storage` if the outcome cannot
    /// be persisted.
    pub async fn submit_answer(&mut self, label: OptionLabel) -> Result<Reveal, QuizServiceError> {
        let before = self.session.clone();

        match self.session.submit_answer(label)? {
            Submission::AlreadyRevealed => {}
            Submission::Scored { id, correct } => {
                let answered_at = self.clock.now();
                if let Err(err) = self.progress.record_outcome(&id, correct, answered_at).await {
                    self.session = before;
                    return Err(err.into());
                }
                debug!(%id, correct, "outcome recorded");
            }
        }

        // A reveal always exists after a successful submission path.
        self.session
            .reveal()
            .copied()
            .ok_or(QuizServiceError::Session(
                quiz_core::session::SessionError::NoCurrentItem,
            ))
    }

    /// Present a specific question by id, bypassing the unanswered filter
    /// (browse navigation). Re-answering overwrites the stored outcome.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotFound` if the id is not in the dataset.
    pub fn open_item(&mut self, id: &QuestionId) -> Result<QuestionItem, QuizServiceError> {
        let item = self
            .dataset
            .get(id)
            .cloned()
            .ok_or_else(|| QuizServiceError::NotFound(id.clone()))?;
        self.session.load_item(item.clone());
        Ok(item)
    }

    /// Clear all persisted progress. The session returns to `Idle`; the next
    /// `next_question` call can select any item again.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the deletion fails.
    pub async fn reset_progress(&mut self) -> Result<(), QuizServiceError> {
        self.progress.reset().await?;
        self.session = QuizSession::new();
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
