#![forbid(unsafe_code)]

pub mod dataset_loader;
pub mod error;
pub mod picker;
pub mod quiz_service;
pub mod stats_service;

pub use quiz_core::Clock;

pub use dataset_loader::{DatasetLoadError, DatasetSource, load_dataset, parse_dataset};
pub use error::QuizServiceError;
pub use picker::{RandomPicker, SequencePicker};
pub use quiz_service::QuizService;
pub use stats_service::StatsService;
