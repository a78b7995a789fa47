mod browse;
mod quiz;
mod state;
mod stats;

pub use browse::BrowseView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use stats::StatsView;
