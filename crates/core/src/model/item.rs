use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::media::MediaSource;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Data-integrity faults detected when turning a raw record into an item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("question text is empty")]
    EmptyQuestion,

    #[error("item defines {0} options; at least 2 are required")]
    TooFewOptions(usize),

    #[error("correct option {0} is not among the defined options")]
    CorrectOptionMissing(OptionLabel),

    #[error("item has no media reference")]
    NoMedia,

    #[error("id already taken by an earlier record")]
    DuplicateId,
}

//
// ─── OPTION LABEL ──────────────────────────────────────────────────────────────
//

/// One of the four fixed answer slots.
///
/// An item may define only a subset of labels; absent labels are never
/// presented as distractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in presentation order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    #[must_use]
    pub fn from_char(value: char) -> Option<Self> {
        match value.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for OptionLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OptionLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let mut chars = raw.trim().chars();
        match (chars.next().and_then(Self::from_char), chars.next()) {
            (Some(label), None) => Ok(label),
            _ => Err(serde::de::Error::custom(format!(
                "invalid option label: {raw:?}"
            ))),
        }
    }
}

//
// ─── QUESTION ITEM ─────────────────────────────────────────────────────────────
//

/// One quiz question: text, 2-4 labeled options, the correct label, the
/// explanation shown after answering, optional long-form report, optional
/// category tags, and at least one clip reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionItem {
    id: QuestionId,
    question: String,
    options: BTreeMap<OptionLabel, String>,
    correct_option: OptionLabel,
    answer_text: String,
    report_text: Option<String>,
    structure: Option<String>,
    view: Option<String>,
    media: Vec<MediaSource>,
}

impl QuestionItem {
    /// Build an item, enforcing the structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` if the question text is blank, fewer than two
    /// options are defined, the correct label is not among them, or no media
    /// reference is present.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QuestionId,
        question: impl Into<String>,
        options: BTreeMap<OptionLabel, String>,
        correct_option: OptionLabel,
        answer_text: impl Into<String>,
        report_text: Option<String>,
        structure: Option<String>,
        view: Option<String>,
        media: Vec<MediaSource>,
    ) -> Result<Self, ItemError> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(ItemError::EmptyQuestion);
        }
        if options.len() < 2 {
            return Err(ItemError::TooFewOptions(options.len()));
        }
        if !options.contains_key(&correct_option) {
            return Err(ItemError::CorrectOptionMissing(correct_option));
        }
        if media.is_empty() {
            return Err(ItemError::NoMedia);
        }

        Ok(Self {
            id,
            question,
            options,
            correct_option,
            answer_text: answer_text.into(),
            report_text,
            structure,
            view,
            media,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Defined options in fixed label order. Absent labels are not present.
    #[must_use]
    pub fn options(&self) -> &BTreeMap<OptionLabel, String> {
        &self.options
    }

    #[must_use]
    pub fn option_text(&self, label: OptionLabel) -> Option<&str> {
        self.options.get(&label).map(String::as_str)
    }

    #[must_use]
    pub fn has_option(&self, label: OptionLabel) -> bool {
        self.options.contains_key(&label)
    }

    #[must_use]
    pub fn correct_option(&self) -> OptionLabel {
        self.correct_option
    }

    #[must_use]
    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    #[must_use]
    pub fn report_text(&self) -> Option<&str> {
        self.report_text.as_deref()
    }

    #[must_use]
    pub fn structure(&self) -> Option<&str> {
        self.structure.as_deref()
    }

    #[must_use]
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    /// All clip references; only the first is played.
    #[must_use]
    pub fn media(&self) -> &[MediaSource] {
        &self.media
    }

    #[must_use]
    pub fn primary_media(&self) -> &MediaSource {
        // Invariant: `media` is non-empty (checked in `new`).
        &self.media[0]
    }
}

//
// ─── RAW DATASET RECORD ────────────────────────────────────────────────────────
//

/// Serde mirror of one raw dataset entry.
///
/// Field names follow the published JSON; `into_item` applies validation so
/// repositories and loaders never hand malformed items to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "messages_id")]
    pub id: QuestionId,
    pub question: String,
    #[serde(rename = "option_A", default)]
    pub option_a: Option<String>,
    #[serde(rename = "option_B", default)]
    pub option_b: Option<String>,
    #[serde(rename = "option_C", default)]
    pub option_c: Option<String>,
    #[serde(rename = "option_D", default)]
    pub option_d: Option<String>,
    pub correct_option: OptionLabel,
    pub answer: String,
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub structure: Option<String>,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(rename = "videos", default)]
    pub media: Vec<MediaSource>,
}

impl QuestionRecord {
    /// Convert the raw record into a validated domain item.
    ///
    /// Empty or whitespace-only option texts count as absent.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` when a structural invariant fails.
    pub fn into_item(self) -> Result<QuestionItem, ItemError> {
        let mut options = BTreeMap::new();
        let slots = [
            (OptionLabel::A, self.option_a),
            (OptionLabel::B, self.option_b),
            (OptionLabel::C, self.option_c),
            (OptionLabel::D, self.option_d),
        ];
        for (label, text) in slots {
            if let Some(text) = text {
                if !text.trim().is_empty() {
                    options.insert(label, text);
                }
            }
        }

        QuestionItem::new(
            self.id,
            self.question,
            options,
            self.correct_option,
            self.answer,
            self.report.filter(|r| !r.trim().is_empty()),
            self.structure.filter(|s| !s.trim().is_empty()),
            self.view.filter(|v| !v.trim().is_empty()),
            self.media,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
