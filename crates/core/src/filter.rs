use crate::model::{Dataset, QuestionItem};

/// Stateless query over the dataset for the browse table.
///
/// Tag filters are exact matches; the free-text filter is a case-insensitive
/// substring match against the question text. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub structure: Option<String>,
    pub view: Option<String>,
    pub search: String,
}

impl BrowseFilter {
    #[must_use]
    pub fn matches(&self, item: &QuestionItem) -> bool {
        if let Some(structure) = &self.structure {
            if item.structure() != Some(structure.as_str()) {
                return false;
            }
        }
        if let Some(view) = &self.view {
            if item.view() != Some(view.as_str()) {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !item.question().to_lowercase().contains(&needle) {
            return false;
        }
        true
    }

    /// Filtered subsequence in dataset order.
    #[must_use]
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a QuestionItem> {
        dataset
            .items()
            .iter()
            .filter(|item| self.matches(item))
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MediaSource, OptionLabel, QuestionId, QuestionRecord};

    fn item(id: &str, question: &str, structure: Option<&str>, view: Option<&str>) -> QuestionItem {
        QuestionRecord {
            id: QuestionId::new(id),
            question: question.into(),
            option_a: Some("Yes".into()),
            option_b: Some("No".into()),
            option_c: None,
            option_d: None,
            correct_option: OptionLabel::A,
            answer: "Yes.".into(),
            report: None,
            structure: structure.map(str::to_owned),
            view: view.map(str::to_owned),
            media: vec![MediaSource::parse("videos/v.mp4").unwrap()],
        }
        .into_item()
        .unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::from_items(vec![
            item("q1", "Is the aortic valve calcified?", Some("aorta"), Some("plax")),
            item("q2", "Is the mitral valve thickened?", Some("mitral valve"), Some("a4c")),
            item("q3", "Is there a pleural effusion?", None, Some("a4c")),
        ])
    }

    #[test]
    fn default_filter_matches_everything_in_order() {
        let dataset = dataset();
        let out = BrowseFilter::default().apply(&dataset);
        let ids: Vec<&str> = out.iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filter = BrowseFilter {
            search: "VALVE".into(),
            ..BrowseFilter::default()
        };
        assert_eq!(filter.apply(&dataset()).len(), 2);
    }

    #[test]
    fn tag_filters_are_exact() {
        let filter = BrowseFilter {
            view: Some("a4c".into()),
            ..BrowseFilter::default()
        };
        assert_eq!(filter.apply(&dataset()).len(), 2);

        let filter = BrowseFilter {
            structure: Some("aorta".into()),
            view: Some("a4c".into()),
            ..BrowseFilter::default()
        };
        assert!(filter.apply(&dataset()).is_empty());
    }

    #[test]
    fn untagged_items_fail_tag_filters() {
        let filter = BrowseFilter {
            structure: Some("aorta".into()),
            ..BrowseFilter::default()
        };
        let dataset = dataset();
        let out = filter.apply(&dataset);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id().as_str(), "q1");
    }

    #[test]
    fn criteria_combine_conjunctively() {
        let filter = BrowseFilter {
            view: Some("a4c".into()),
            search: "mitral".into(),
            ..BrowseFilter::default()
        };
        let dataset = dataset();
        let out = filter.apply(&dataset);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id().as_str(), "q2");
    }
}
