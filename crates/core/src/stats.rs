use std::collections::BTreeMap;

use crate::model::{Dataset, Progress, QuestionItem};

/// Bucket label for items without a category tag.
pub const UNKNOWN_GROUP: &str = "Unknown";

//
// ─── REPORT TYPES ──────────────────────────────────────────────────────────────
//

/// Which categorical tag to bucket by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Structure,
    View,
}

impl GroupField {
    fn of(self, item: &QuestionItem) -> &str {
        let tag = match self {
            Self::Structure => item.structure(),
            Self::View => item.view(),
        };
        tag.unwrap_or(UNKNOWN_GROUP)
    }
}

/// Per-group accuracy tuple. `accuracy_percent` is `None` ("-" at render
/// time) while the group has no answered items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStats {
    pub key: String,
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub accuracy_percent: Option<u8>,
}

/// Ephemeral aggregate report; recomputed on demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsReport {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy_percent: u8,
    pub by_structure: Vec<GroupStats>,
    pub by_view: Vec<GroupStats>,
}

//
// ─── COMPUTATION ───────────────────────────────────────────────────────────────
//

/// Round-half-up integer percentage. Inputs are non-negative counts, so
/// `f64::round` (half away from zero) matches half-up.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(correct: usize, answered: usize) -> u8 {
    if answered == 0 {
        return 0;
    }
    ((correct as f64 / answered as f64) * 100.0).round() as u8
}

/// Breakdown for one grouping field, sorted by group key ascending.
#[must_use]
pub fn group_breakdown(dataset: &Dataset, progress: &Progress, field: GroupField) -> Vec<GroupStats> {
    #[derive(Default)]
    struct Acc {
        total: usize,
        answered: usize,
        correct: usize,
    }

    let mut groups: BTreeMap<String, Acc> = BTreeMap::new();
    for item in dataset.items() {
        let acc = groups.entry(field.of(item).to_owned()).or_default();
        acc.total += 1;
        if let Some(outcome) = progress.outcome(item.id()) {
            acc.answered += 1;
            if outcome.correct {
                acc.correct += 1;
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, acc)| GroupStats {
            key,
            total: acc.total,
            answered: acc.answered,
            correct: acc.correct,
            accuracy_percent: (acc.answered > 0).then(|| percent(acc.correct, acc.answered)),
        })
        .collect()
}

/// Compute the full report from the dataset and a progress snapshot.
///
/// `answered` counts every progress entry, including stale entries whose
/// question is no longer in the dataset; those never inflate `total` or any
/// group.
#[must_use]
pub fn compute_report(dataset: &Dataset, progress: &Progress) -> StatsReport {
    let total = dataset.len();
    let answered = progress.answered_count();
    let correct = progress.correct_count();

    StatsReport {
        total,
        answered,
        correct,
        incorrect: answered - correct,
        accuracy_percent: percent(correct, answered),
        by_structure: group_breakdown(dataset, progress, GroupField::Structure),
        by_view: group_breakdown(dataset, progress, GroupField::View),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
