use std::collections::HashMap;

use crate::model::ids::QuestionId;
use crate::model::item::{ItemError, QuestionItem, QuestionRecord};

//
// ─── SKIPPED RECORDS ───────────────────────────────────────────────────────────
//

/// A raw record that failed validation and was left out of the dataset.
///
/// Loaders log these at warn level; the session never sees malformed items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub id: QuestionId,
    pub reason: ItemError,
}

//
// ─── DATASET ───────────────────────────────────────────────────────────────────
//

/// Immutable, ordered question bank loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    items: Vec<QuestionItem>,
    by_id: HashMap<QuestionId, usize>,
}

impl Dataset {
    /// Build a dataset from raw records.
    ///
    /// Structurally invalid records are skipped rather than failing the whole
    /// load; they are returned alongside the dataset so the caller can log
    /// them. Duplicate ids keep the first occurrence and report the rest as
    /// skipped.
    #[must_use]
    pub fn from_records(records: Vec<QuestionRecord>) -> (Self, Vec<SkippedRecord>) {
        let mut items = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let id = record.id.clone();
            if by_id.contains_key(&id) {
                skipped.push(SkippedRecord {
                    index,
                    id,
                    reason: ItemError::DuplicateId,
                });
                continue;
            }
            match record.into_item() {
                Ok(item) => {
                    by_id.insert(id, items.len());
                    items.push(item);
                }
                Err(reason) => skipped.push(SkippedRecord { index, id, reason }),
            }
        }

        (Self { items, by_id }, skipped)
    }

    /// Build a dataset from already-validated items (used by tests).
    #[must_use]
    pub fn from_items(items: Vec<QuestionItem>) -> Self {
        let by_id = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id().clone(), idx))
            .collect();
        Self { items, by_id }
    }

    #[must_use]
    pub fn items(&self) -> &[QuestionItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&QuestionItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct `structure` tags, sorted ascending. Untagged items are ignored.
    #[must_use]
    pub fn distinct_structures(&self) -> Vec<String> {
        Self::distinct(self.items.iter().filter_map(QuestionItem::structure))
    }

    /// Distinct `view` tags, sorted ascending. Untagged items are ignored.
    #[must_use]
    pub fn distinct_views(&self) -> Vec<String> {
        Self::distinct(self.items.iter().filter_map(QuestionItem::view))
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut out: Vec<String> = values.map(str::to_owned).collect();
        out.sort();
        out.dedup();
        out
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
