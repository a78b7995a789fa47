#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod model;
pub mod session;
pub mod stats;
pub mod time;

pub use error::Error;
pub use filter::BrowseFilter;
pub use session::{
    ItemPicker, NO_REPORT_PLACEHOLDER, QuizSession, Reveal, SessionError, SessionState, Submission,
};
pub use stats::{GroupField, GroupStats, StatsReport, UNKNOWN_GROUP, compute_report};
pub use time::Clock;
