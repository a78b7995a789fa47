use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use quiz_core::model::{Dataset, QuestionRecord};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Failure to retrieve or parse the question set.
///
/// Fatal only to the quiz view: the caller falls back to an empty dataset
/// and surfaces the message inline; browse and stats tolerate emptiness.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetLoadError {
    #[error("failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

//
// ─── SOURCE ────────────────────────────────────────────────────────────────────
//

/// Where the question set comes from: a local JSON file or an HTTP resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Http(Url),
}

impl DatasetSource {
    /// Interpret a CLI/env string: absolute `http(s)` URLs fetch over the
    /// network, everything else is a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if let Ok(url) = Url::parse(raw) {
            if matches!(url.scheme(), "http" | "https") {
                return Self::Http(url);
            }
        }
        Self::File(PathBuf::from(raw))
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => write!(f, "{url}"),
        }
    }
}

//
// ─── LOADING ───────────────────────────────────────────────────────────────────
//

/// Parse raw JSON bytes into a dataset.
///
/// Structurally invalid records are skipped and logged at warn level, per
/// the lenient load-time validation policy; a malformed document as a whole
/// is a `Parse` error.
///
/// # Errors
///
/// Returns `DatasetLoadError::Parse` if the document is not a JSON array of
/// question records.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, DatasetLoadError> {
    let records: Vec<QuestionRecord> = serde_json::from_slice(bytes)?;
    let record_count = records.len();
    let (dataset, skipped) = Dataset::from_records(records);

    for skip in &skipped {
        warn!(
            id = %skip.id,
            index = skip.index,
            reason = %skip.reason,
            "skipping malformed question record"
        );
    }
    info!(
        items = dataset.len(),
        skipped = skipped.len(),
        records = record_count,
        "dataset loaded"
    );

    Ok(dataset)
}

/// Retrieve the question set once at startup.
///
/// # Errors
///
/// Returns `DatasetLoadError` for network, I/O, or parse failures.
pub async fn load_dataset(source: &DatasetSource) -> Result<Dataset, DatasetLoadError> {
    let bytes = match source {
        DatasetSource::File(path) => std::fs::read(path)?,
        DatasetSource::Http(url) => reqwest::get(url.clone())
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec(),
    };
    parse_dataset(&bytes)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parsing_distinguishes_urls_and_paths() {
        assert!(matches!(
            DatasetSource::parse("https://example.org/data.json"),
            DatasetSource::Http(_)
        ));
        assert!(matches!(
            DatasetSource::parse("data/MIMICEchoQA.json"),
            DatasetSource::File(_)
        ));
        // Windows-style drive letters must not be mistaken for URL schemes.
        assert!(matches!(
            DatasetSource::parse("/abs/path/data.json"),
            DatasetSource::File(_)
        ));
    }

    #[test]
    fn well_formed_document_parses() {
        let json = br#"[
            {
                "messages_id": "q1",
                "question": "Is the aorta dilated?",
                "option_A": "Yes",
                "option_B": "No",
                "correct_option": "A",
                "answer": "The aorta is dilated.",
                "structure": "aorta",
                "view": "plax",
                "videos": ["videos/q1.mp4"]
            }
        ]"#;
        let dataset = parse_dataset(json).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        // Second record's correct option is not among its options.
        let json = br#"[
            {
                "messages_id": "q1",
                "question": "Q1?",
                "option_A": "Yes",
                "option_B": "No",
                "correct_option": "A",
                "answer": "Yes.",
                "videos": ["videos/q1.mp4"]
            },
            {
                "messages_id": "q2",
                "question": "Q2?",
                "option_A": "Yes",
                "option_B": "No",
                "correct_option": "D",
                "answer": "Yes.",
                "videos": ["videos/q2.mp4"]
            }
        ]"#;
        let dataset = parse_dataset(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.items()[0].id().as_str(), "q1");
    }

    #[test]
    fn duplicate_ids_keep_the_first_record() {
        let json = br#"[
            {
                "messages_id": "q1",
                "question": "First?",
                "option_A": "Yes",
                "option_B": "No",
                "correct_option": "A",
                "answer": "Yes.",
                "videos": ["videos/q1.mp4"]
            },
            {
                "messages_id": "q1",
                "question": "Second?",
                "option_A": "Yes",
                "option_B": "No",
                "correct_option": "B",
                "answer": "No.",
                "videos": ["videos/q1b.mp4"]
            }
        ]"#;
        let dataset = parse_dataset(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.items()[0].question(), "First?");
    }

    #[test]
    fn invalid_document_is_a_parse_error() {
        let err = parse_dataset(b"{ not a list }").unwrap_err();
        assert!(matches!(err, DatasetLoadError::Parse(_)));
    }
}
