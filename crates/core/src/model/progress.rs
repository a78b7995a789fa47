use chrono::{DateTime, Utc};
use chrono::serde::ts_milliseconds;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::ids::QuestionId;

//
// ─── OUTCOME RECORD ────────────────────────────────────────────────────────────
//

/// Recorded result of answering one question.
///
/// The wire format is fixed, so stored blobs stay readable across versions:
/// `{"correct": bool, "answeredAt": <unix millis>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub correct: bool,
    #[serde(rename = "answeredAt", with = "ts_milliseconds")]
    pub answered_at: DateTime<Utc>,
}

impl OutcomeRecord {
    #[must_use]
    pub fn new(correct: bool, answered_at: DateTime<Utc>) -> Self {
        Self {
            correct,
            answered_at,
        }
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// The full set of recorded outcomes, keyed by question id.
///
/// At most one record per id: re-answering overwrites the prior outcome
/// (last-write-wins, no history).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub results: BTreeMap<QuestionId, OutcomeRecord>,
}

impl Progress {
    #[must_use]
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.results.contains_key(id)
    }

    #[must_use]
    pub fn outcome(&self, id: &QuestionId) -> Option<&OutcomeRecord> {
        self.results.get(id)
    }

    /// Upsert the outcome for `id`, replacing any prior record.
    pub fn record(&mut self, id: QuestionId, correct: bool, answered_at: DateTime<Utc>) {
        self.results
            .insert(id, OutcomeRecord::new(correct, answered_at));
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results.values().filter(|r| r.correct).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn record_is_last_write_wins() {
        let mut progress = Progress::default();
        let id = QuestionId::new("q1");
        progress.record(id.clone(), false, fixed_now());
        progress.record(id.clone(), true, fixed_now() + chrono::Duration::seconds(5));

        assert_eq!(progress.answered_count(), 1);
        let outcome = progress.outcome(&id).unwrap();
        assert!(outcome.correct);
    }

    #[test]
    fn counts_track_correct_and_answered() {
        let mut progress = Progress::default();
        progress.record(QuestionId::new("a"), true, fixed_now());
        progress.record(QuestionId::new("b"), false, fixed_now());
        progress.record(QuestionId::new("c"), true, fixed_now());

        assert_eq!(progress.answered_count(), 3);
        assert_eq!(progress.correct_count(), 2);
    }

    #[test]
    fn wire_format_is_stable() {
        let mut progress = Progress::default();
        progress.record(
            QuestionId::new("q1"),
            true,
            DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        );
        let json = serde_json::to_string(&progress).unwrap();
        assert_eq!(
            json,
            r#"{"results":{"q1":{"correct":true,"answeredAt":1700000000000}}}"#
        );

        let back: Progress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }

    #[test]
    fn empty_document_deserializes_to_empty_progress() {
        let progress: Progress = serde_json::from_str("{}").unwrap();
        assert!(progress.is_empty());
    }
}
