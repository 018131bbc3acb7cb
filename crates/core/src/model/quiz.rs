use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ContentError;

/// Every theory question offers exactly this many choices.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question field `{field}` is empty")]
    EmptyText { field: &'static str },

    #[error("expected 4 options, got {found}")]
    OptionCount { found: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── QUIZ QUESTION ─────────────────────────────────────────────────────────────
//

/// A single multiple-choice theory question.
///
/// Field names follow the provider's camelCase JSON (`correctIndex`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// Build and validate a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the question breaks the four-option shape.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let question = Self {
            question: question.into(),
            options,
            correct_index,
            explanation: explanation.into(),
        };
        question.validate()?;
        Ok(question)
    }

    /// # Errors
    ///
    /// Returns the first shape violation found.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyText { field: "question" });
        }
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::OptionCount {
                found: self.options.len(),
            });
        }
        if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if self.correct_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len: self.options.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.option(self.correct_index)
    }

    /// Text used to key a remediation request when this question is missed.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.question
    }
}

/// Validate a whole quiz set in provider order.
///
/// # Errors
///
/// Returns `ContentError::EmptyQuiz` for an empty set, or the first invalid question.
pub fn validate_quiz(questions: &[QuizQuestion]) -> Result<(), ContentError> {
    if questions.is_empty() {
        return Err(ContentError::EmptyQuiz);
    }
    for question in questions {
        question.validate()?;
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
