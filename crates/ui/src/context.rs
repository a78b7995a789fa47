use std::sync::Arc;

use tokio::sync::Mutex;

use quiz_core::model::Dataset;
use services::{QuizService, StatsService};

/// Services the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn dataset(&self) -> Arc<Dataset>;
    /// Set when the question set failed to load at startup; the quiz view
    /// surfaces it inline while browse and stats render the empty dataset.
    fn dataset_error(&self) -> Option<String>;

    fn quiz(&self) -> Arc<Mutex<QuizService>>;
    fn stats(&self) -> Arc<StatsService>;
}

#[derive(Clone)]
pub struct AppContext {
    dataset: Arc<Dataset>,
    dataset_error: Option<String>,

    quiz: Arc<Mutex<QuizService>>,
    stats: Arc<StatsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            dataset: app.dataset(),
            dataset_error: app.dataset_error(),
            quiz: app.quiz(),
            stats: app.stats(),
        }
    }

    #[must_use]
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    #[must_use]
    pub fn dataset_error(&self) -> Option<&str> {
        self.dataset_error.as_deref()
    }

    /// The quiz session is shared behind a mutex so it survives tab
    /// switches: browse's "open" action loads an item into the same session
    /// the quiz tab renders.
    #[must_use]
    pub fn quiz(&self) -> Arc<Mutex<QuizService>> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
