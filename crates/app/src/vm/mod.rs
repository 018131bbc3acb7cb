mod chat_vm;
mod quiz_vm;
mod review_vm;
mod scenario_vm;
mod stats_vm;
mod time_fmt;

pub use chat_vm::chat_line;
pub use quiz_vm::{answer_feedback, map_question, parse_option};
pub use review_vm::ReviewCardVm;
pub use scenario_vm::{ScenarioVm, choice_feedback};
pub use stats_vm::StatsVm;
