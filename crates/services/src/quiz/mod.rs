mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use session::{AnswerOutcome, QuizResult, QuizSession, QuizState, QuizStep};
pub use workflow::{AnswerReport, QuizLoopService, Remediation};
