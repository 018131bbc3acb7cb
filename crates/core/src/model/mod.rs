mod badge;
mod chat;
mod flashcard;
mod ids;
mod quiz;
mod scenario;
mod sign;
mod stats;

pub use badge::{Badge, default_badges};
pub use chat::{ChatMessage, ChatRole};
pub use flashcard::{Flashcard, FlashcardError};
pub use ids::{BadgeId, FlashcardId, ScenarioId};
pub use quiz::{OPTIONS_PER_QUESTION, QuestionError, QuizQuestion, validate_quiz};
pub use scenario::{DrivingScenario, ScenarioContentError, ScenarioOption};
pub use sign::{ROAD_SIGNS, RoadSign, SignCategory};
pub use stats::UserStats;
