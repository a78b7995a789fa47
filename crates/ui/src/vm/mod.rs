mod browse_vm;
mod quiz_vm;
mod stats_vm;

pub use browse_vm::{BrowseRowVm, BrowseVm, map_browse};
pub use quiz_vm::{
    OptionState, OptionVm, QuestionVm, QuizVm, RevealVm, map_question, snapshot_quiz,
};
pub use stats_vm::{GroupRowVm, StatsVm, map_stats};
