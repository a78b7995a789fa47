use quiz_core::filter::BrowseFilter;
use quiz_core::model::Dataset;
use quiz_core::stats::UNKNOWN_GROUP;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseRowVm {
    pub id: String,
    pub question: String,
    pub structure: String,
    pub view: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseVm {
    pub rows: Vec<BrowseRowVm>,
    pub count_label: String,
    /// Distinct tag values for the filter dropdowns, sorted.
    pub structures: Vec<String>,
    pub views: Vec<String>,
}

/// Apply the filter and shape the result for the browse table.
#[must_use]
pub fn map_browse(dataset: &Dataset, filter: &BrowseFilter) -> BrowseVm {
    let rows: Vec<BrowseRowVm> = filter
        .apply(dataset)
        .into_iter()
        .map(|item| BrowseRowVm {
            id: item.id().to_string(),
            question: item.question().to_owned(),
            structure: item.structure().unwrap_or(UNKNOWN_GROUP).to_owned(),
            view: item.view().unwrap_or(UNKNOWN_GROUP).to_owned(),
        })
        .collect();

    BrowseVm {
        count_label: format!("{} of {} questions", rows.len(), dataset.len()),
        rows,
        structures: dataset.distinct_structures(),
        views: dataset.distinct_views(),
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
