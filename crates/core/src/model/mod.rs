mod dataset;
mod ids;
mod item;
mod media;
mod progress;

pub use dataset::{Dataset, SkippedRecord};
pub use ids::QuestionId;
pub use item::{ItemError, OptionLabel, QuestionItem, QuestionRecord};
pub use media::{MediaError, MediaSource};
pub use progress::{OutcomeRecord, Progress};
