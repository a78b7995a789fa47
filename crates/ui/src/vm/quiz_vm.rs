use quiz_core::model::{OptionLabel, QuestionItem};
use quiz_core::session::{NO_REPORT_PLACEHOLDER, Reveal, SessionState};
use services::QuizService;

/// How one answer button renders after (or before) the reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Not yet revealed; the button is clickable.
    Selectable,
    /// Revealed and this is the correct option.
    Correct,
    /// Revealed and this is the chosen, wrong option.
    Incorrect,
    /// Revealed and neither chosen nor correct.
    Dimmed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: OptionLabel,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealVm {
    pub was_correct: bool,
    pub verdict: String,
    pub answer_text: String,
    pub report_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: String,
    pub question: String,
    pub media_src: String,
    pub tag_line: Option<String>,
    pub options: Vec<OptionVm>,
    pub reveal: Option<RevealVm>,
}

/// Render-ready snapshot of the quiz session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizVm {
    Loading,
    /// Idle session over an empty dataset: nothing to quiz on.
    Empty,
    Question(QuestionVm),
    /// Every question in the bank has a recorded outcome.
    Completed { total: usize },
}

fn option_state(label: OptionLabel, reveal: Option<&Reveal>) -> OptionState {
    match reveal {
        None => OptionState::Selectable,
        Some(reveal) if label == reveal.correct_option => OptionState::Correct,
        Some(reveal) if label == reveal.chosen => OptionState::Incorrect,
        Some(_) => OptionState::Dimmed,
    }
}

#[must_use]
pub fn map_question(item: &QuestionItem, reveal: Option<&Reveal>) -> QuestionVm {
    let options = OptionLabel::ALL
        .iter()
        .filter_map(|&label| {
            item.option_text(label).map(|text| OptionVm {
                label,
                text: text.to_owned(),
                state: option_state(label, reveal),
            })
        })
        .collect();

    let tag_line = match (item.structure(), item.view()) {
        (None, None) => None,
        (structure, view) => Some(
            [structure, view]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<_>>()
                .join(" · "),
        ),
    };

    QuestionVm {
        id: item.id().to_string(),
        question: item.question().to_owned(),
        media_src: item.primary_media().to_string(),
        tag_line,
        options,
        reveal: reveal.map(|reveal| RevealVm {
            was_correct: reveal.was_correct,
            verdict: if reveal.was_correct {
                "Correct!".to_owned()
            } else {
                format!("Incorrect. The correct answer was {}.", reveal.correct_option)
            },
            answer_text: item.answer_text().to_owned(),
            report_text: item
                .report_text()
                .unwrap_or(NO_REPORT_PLACEHOLDER)
                .to_owned(),
        }),
    }
}

/// Snapshot the service's session into a render-ready model.
#[must_use]
pub fn snapshot_quiz(service: &QuizService) -> QuizVm {
    match service.state() {
        SessionState::Idle => QuizVm::Empty,
        SessionState::Exhausted => QuizVm::Completed {
            total: service.dataset().len(),
        },
        SessionState::Presenting { item } => QuizVm::Question(map_question(item, None)),
        SessionState::Revealed { item, reveal } => {
            QuizVm::Question(map_question(item, Some(reveal)))
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
