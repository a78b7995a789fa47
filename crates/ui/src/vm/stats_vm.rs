use quiz_core::stats::{GroupStats, StatsReport};

/// One row of a grouped-accuracy table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupRowVm {
    pub key: String,
    pub answered_label: String,
    /// `"-"` while the group has no answered items.
    pub accuracy_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub total_label: String,
    pub answered_label: String,
    pub correct_label: String,
    pub incorrect_label: String,
    pub accuracy_label: String,
    /// Share of the bank answered, 0..=100, for the progress bar.
    pub progress_percent: u8,
    pub by_structure: Vec<GroupRowVm>,
    pub by_view: Vec<GroupRowVm>,
}

fn map_group(group: &GroupStats) -> GroupRowVm {
    GroupRowVm {
        key: group.key.clone(),
        answered_label: format!("{} / {}", group.answered, group.total),
        accuracy_label: group
            .accuracy_percent
            .map_or_else(|| "-".to_owned(), |p| format!("{p}%")),
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn share(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u8
}

#[must_use]
pub fn map_stats(report: &StatsReport) -> StatsVm {
    StatsVm {
        total_label: report.total.to_string(),
        answered_label: report.answered.to_string(),
        correct_label: report.correct.to_string(),
        incorrect_label: report.incorrect.to_string(),
        // The "-" sentinel is for unanswered groups only; the overall tile
        // shows 0% before anything is answered.
        accuracy_label: format!("{}%", report.accuracy_percent),
        progress_percent: share(report.answered, report.total),
        by_structure: report.by_structure.iter().map(map_group).collect(),
        by_view: report.by_view.iter().map(map_group).collect(),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_renders_zero_percent_accuracy() {
        let vm = map_stats(&StatsReport::default());
        assert_eq!(vm.accuracy_label, "0%");
        assert_eq!(vm.answered_label, "0");
        assert_eq!(vm.progress_percent, 0);
    }

    #[test]
    fn groups_render_counts_and_percentages() {
        let report = StatsReport {
            total: 4,
            answered: 3,
            correct: 2,
            incorrect: 1,
            accuracy_percent: 67,
            by_structure: vec![
                GroupStats {
                    key: "aorta".into(),
                    total: 2,
                    answered: 2,
                    correct: 1,
                    accuracy_percent: Some(50),
                },
                GroupStats {
                    key: "mitral valve".into(),
                    total: 2,
                    answered: 0,
                    correct: 0,
                    accuracy_percent: None,
                },
            ],
            by_view: Vec::new(),
        };

        let vm = map_stats(&report);
        assert_eq!(vm.accuracy_label, "67%");
        assert_eq!(vm.progress_percent, 75);
        assert_eq!(vm.by_structure[0].answered_label, "2 / 2");
        assert_eq!(vm.by_structure[0].accuracy_label, "50%");
        assert_eq!(vm.by_structure[1].accuracy_label, "-");
    }
}
