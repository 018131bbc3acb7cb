use thiserror::Error;

use crate::model::{FlashcardError, QuestionError, ScenarioContentError};

/// Validation failure for any piece of content handed over by a provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Scenario(#[from] ScenarioContentError),
    #[error(transparent)]
    Flashcard(#[from] FlashcardError),
    #[error("quiz set is empty")]
    EmptyQuiz,
}
