use thiserror::Error;

use crate::model::{Dataset, OptionLabel, Progress, QuestionId, QuestionItem};

/// Placeholder shown when an item carries no long-form report.
pub const NO_REPORT_PLACEHOLDER: &str = "No report available.";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no question is currently presented")]
    NoCurrentItem,

    #[error("option {0} is not defined for the current question")]
    InvalidOption(OptionLabel),
}

//
// ─── ITEM PICKER ───────────────────────────────────────────────────────────────
//

/// Source of randomness for question selection.
///
/// `pick` receives the number of unanswered candidates (always non-zero) and
/// returns an index into that list. Production uses a `rand`-backed picker;
/// tests script the sequence.
pub trait ItemPicker {
    fn pick(&mut self, len: usize) -> usize;
}

//
// ─── REVEAL ────────────────────────────────────────────────────────────────────
//

/// What a submission exposed: the chosen label, the correct label, and
/// whether they matched. Explanation and report text live on the item itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub chosen: OptionLabel,
    pub correct_option: OptionLabel,
    pub was_correct: bool,
}

/// Outcome of `submit_answer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// First valid submission for this presentation; the caller must persist
    /// the outcome.
    Scored { id: QuestionId, correct: bool },
    /// The answer was already revealed; nothing was scored or recorded.
    AlreadyRevealed,
}

//
// ─── SESSION STATE MACHINE ─────────────────────────────────────────────────────
//

/// `Idle` → `Presenting` → `Revealed` → `Presenting` | `Exhausted`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing loaded yet (startup, or an empty dataset).
    #[default]
    Idle,
    /// An item is loaded and unanswered.
    Presenting { item: QuestionItem },
    /// The current item was answered; explanation is visible.
    Revealed { item: QuestionItem, reveal: Reveal },
    /// Every dataset item has a recorded outcome.
    Exhausted,
}

/// One-question-at-a-time selector over the dataset.
///
/// The session is pure state: dataset and progress snapshots are passed into
/// each transition, and scored submissions are handed back to the caller for
/// persistence. Randomness sits behind [`ItemPicker`].
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    state: SessionState,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&QuestionItem> {
        match &self.state {
            SessionState::Presenting { item } | SessionState::Revealed { item, .. } => Some(item),
            SessionState::Idle | SessionState::Exhausted => None,
        }
    }

    #[must_use]
    pub fn reveal(&self) -> Option<&Reveal> {
        match &self.state {
            SessionState::Revealed { reveal, .. } => Some(reveal),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, SessionState::Exhausted)
    }

    /// Report text of the current item, or the placeholder when absent.
    #[must_use]
    pub fn report_text(&self) -> Option<&str> {
        self.current_item()
            .map(|item| item.report_text().unwrap_or(NO_REPORT_PLACEHOLDER))
    }

    /// Select the next unanswered question.
    ///
    /// Any prior reveal state is discarded. With an empty dataset the session
    /// stays `Idle`; with no unanswered items left it becomes `Exhausted`;
    /// otherwise one unanswered item is picked uniformly and presented.
    pub fn select_next(
        &mut self,
        dataset: &Dataset,
        progress: &Progress,
        picker: &mut dyn ItemPicker,
    ) -> Option<&QuestionItem> {
        if dataset.is_empty() {
            self.state = SessionState::Idle;
            return None;
        }

        let unanswered: Vec<&QuestionItem> = dataset
            .items()
            .iter()
            .filter(|item| !progress.is_answered(item.id()))
            .collect();

        if unanswered.is_empty() {
            self.state = SessionState::Exhausted;
            return None;
        }

        let idx = picker.pick(unanswered.len()).min(unanswered.len() - 1);
        self.state = SessionState::Presenting {
            item: unanswered[idx].clone(),
        };
        self.current_item()
    }

    /// Submit an answer for the currently presented item.
    ///
    /// A second submission without an intervening reselection is an idempotent
    /// no-op (`Submission::AlreadyRevealed`); at most one outcome is scored
    /// per presentation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoCurrentItem` in `Idle`/`Exhausted`, and
    /// `SessionError::InvalidOption` if the label is not defined for this
    /// item (absent option slots are not valid input).
    pub fn submit_answer(&mut self, label: OptionLabel) -> Result<Submission, SessionError> {
        match &self.state {
            SessionState::Idle | SessionState::Exhausted => Err(SessionError::NoCurrentItem),
            SessionState::Revealed { .. } => Ok(Submission::AlreadyRevealed),
            SessionState::Presenting { item } => {
                if !item.has_option(label) {
                    return Err(SessionError::InvalidOption(label));
                }

                let correct_option = item.correct_option();
                let was_correct = label == correct_option;
                let submission = Submission::Scored {
                    id: item.id().clone(),
                    correct: was_correct,
                };

                let item = item.clone();
                self.state = SessionState::Revealed {
                    item,
                    reveal: Reveal {
                        chosen: label,
                        correct_option,
                        was_correct,
                    },
                };
                Ok(submission)
            }
        }
    }

    /// Present a specific item, bypassing the unanswered filter.
    ///
    /// Used by browse navigation; re-answering overwrites the stored outcome.
    pub fn load_item(&mut self, item: QuestionItem) {
        self.state = SessionState::Presenting { item };
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MediaSource, QuestionId, QuestionRecord};
    use crate::time::fixed_now;

    /// Picker that replays a scripted index sequence, then sticks at 0.
    struct Scripted(Vec<usize>);

    impl ItemPicker for Scripted {
        fn pick(&mut self, _len: usize) -> usize {
            if self.0.is_empty() { 0 } else { self.0.remove(0) }
        }
    }

    fn item(id: &str) -> QuestionItem {
        QuestionRecord {
            id: QuestionId::new(id),
            question: "Is the valve thickened?".into(),
            option_a: Some("Yes".into()),
            option_b: Some("No".into()),
            option_c: None,
            option_d: None,
            correct_option: OptionLabel::A,
            answer: "The valve is thickened.".into(),
            report: None,
            structure: None,
            view: None,
            media: vec![MediaSource::parse("videos/v.mp4").unwrap()],
        }
        .into_item()
        .unwrap()
    }

    fn dataset(ids: &[&str]) -> Dataset {
        Dataset::from_items(ids.iter().map(|id| item(id)).collect())
    }

    #[test]
    fn select_next_skips_answered_items() {
        let dataset = dataset(&["q1", "q2"]);
        let mut progress = Progress::default();
        progress.record(QuestionId::new("q1"), true, fixed_now());

        let mut session = QuizSession::new();
        let picked = session
            .select_next(&dataset, &progress, &mut Scripted(vec![0]))
            .unwrap();
        assert_eq!(picked.id().as_str(), "q2");
    }

    #[test]
    fn all_answered_transitions_to_exhausted() {
        let dataset = dataset(&["q1"]);
        let mut progress = Progress::default();
        progress.record(QuestionId::new("q1"), false, fixed_now());

        let mut session = QuizSession::new();
        assert!(
            session
                .select_next(&dataset, &progress, &mut Scripted(vec![]))
                .is_none()
        );
        assert!(session.is_exhausted());

        // Exhaustion persists across repeated calls while progress is full.
        session.select_next(&dataset, &progress, &mut Scripted(vec![]));
        assert!(session.is_exhausted());
    }

    #[test]
    fn empty_dataset_stays_idle() {
        let dataset = Dataset::default();
        let mut session = QuizSession::new();
        session.select_next(&dataset, &Progress::default(), &mut Scripted(vec![]));
        assert_eq!(session.state(), &SessionState::Idle);
    }

    #[test]
    fn reset_progress_makes_everything_selectable_again() {
        let dataset = dataset(&["q1"]);
        let mut progress = Progress::default();
        progress.record(QuestionId::new("q1"), true, fixed_now());

        let mut session = QuizSession::new();
        session.select_next(&dataset, &progress, &mut Scripted(vec![]));
        assert!(session.is_exhausted());

        let cleared = Progress::default();
        let picked = session
            .select_next(&dataset, &cleared, &mut Scripted(vec![0]))
            .unwrap();
        assert_eq!(picked.id().as_str(), "q1");
    }

    #[test]
    fn first_submission_scores_and_reveals() {
        let dataset = dataset(&["q1"]);
        let mut session = QuizSession::new();
        session.select_next(&dataset, &Progress::default(), &mut Scripted(vec![0]));

        let submission = session.submit_answer(OptionLabel::B).unwrap();
        assert_eq!(
            submission,
            Submission::Scored {
                id: QuestionId::new("q1"),
                correct: false,
            }
        );

        let reveal = session.reveal().unwrap();
        assert_eq!(reveal.chosen, OptionLabel::B);
        assert_eq!(reveal.correct_option, OptionLabel::A);
        assert!(!reveal.was_correct);
    }

    #[test]
    fn second_submission_is_a_no_op() {
        let dataset = dataset(&["q1"]);
        let mut session = QuizSession::new();
        session.select_next(&dataset, &Progress::default(), &mut Scripted(vec![0]));

        session.submit_answer(OptionLabel::A).unwrap();
        let second = session.submit_answer(OptionLabel::B).unwrap();
        assert_eq!(second, Submission::AlreadyRevealed);

        // The reveal still reflects the first submission.
        assert_eq!(session.reveal().unwrap().chosen, OptionLabel::A);
    }

    #[test]
    fn absent_option_slot_is_rejected() {
        let dataset = dataset(&["q1"]);
        let mut session = QuizSession::new();
        session.select_next(&dataset, &Progress::default(), &mut Scripted(vec![0]));

        let err = session.submit_answer(OptionLabel::C).unwrap_err();
        assert_eq!(err, SessionError::InvalidOption(OptionLabel::C));
        // Still presenting, still answerable.
        assert!(session.reveal().is_none());
        assert!(session.submit_answer(OptionLabel::A).is_ok());
    }

    #[test]
    fn submitting_without_an_item_errors() {
        let mut session = QuizSession::new();
        assert_eq!(
            session.submit_answer(OptionLabel::A).unwrap_err(),
            SessionError::NoCurrentItem
        );
    }

    #[test]
    fn load_item_bypasses_unanswered_filter() {
        let dataset = dataset(&["q1"]);
        let mut progress = Progress::default();
        progress.record(QuestionId::new("q1"), true, fixed_now());

        let mut session = QuizSession::new();
        session.select_next(&dataset, &progress, &mut Scripted(vec![]));
        assert!(session.is_exhausted());

        session.load_item(dataset.get(&QuestionId::new("q1")).unwrap().clone());
        assert_eq!(session.current_item().unwrap().id().as_str(), "q1");

        // Re-answering produces a fresh scored submission.
        let submission = session.submit_answer(OptionLabel::B).unwrap();
        assert!(matches!(submission, Submission::Scored { correct: false, .. }));
    }

    #[test]
    fn answer_then_advance_presents_the_remaining_item() {
        // q1 answered correctly, q2 must follow.
        let dataset = dataset(&["q1", "q2"]);
        let mut progress = Progress::default();

        let mut session = QuizSession::new();
        session.select_next(&dataset, &progress, &mut Scripted(vec![0]));
        let Submission::Scored { id, correct } = session.submit_answer(OptionLabel::A).unwrap()
        else {
            panic!("expected a scored submission");
        };
        assert!(correct);
        progress.record(id, correct, fixed_now());

        let next = session
            .select_next(&dataset, &progress, &mut Scripted(vec![0]))
            .unwrap();
        assert_eq!(next.id().as_str(), "q2");
    }

    #[test]
    fn report_text_falls_back_to_placeholder() {
        let dataset = dataset(&["q1"]);
        let mut session = QuizSession::new();
        assert_eq!(session.report_text(), None);

        session.select_next(&dataset, &Progress::default(), &mut Scripted(vec![0]));
        assert_eq!(session.report_text(), Some(NO_REPORT_PLACEHOLDER));
    }
}
