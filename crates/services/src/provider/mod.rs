//! The content provider seam: everything the learning hub asks the AI service for.

mod content;
mod http;
mod memory;
mod prompts;
mod samples;

use async_trait::async_trait;

use academy_core::model::{ChatMessage, DrivingScenario, Flashcard, QuizQuestion};

use crate::error::ProviderError;

pub use content::{checked_flashcard, checked_quiz, checked_scenario};
pub use http::{HttpContentProvider, ProviderConfig, quiz_size_from_env};
pub use memory::InMemoryContentProvider;

/// Default number of questions in one quiz pass.
pub const DEFAULT_QUIZ_SIZE: usize = 5;

/// Source of quiz sets, scenarios, remediation cards and coach replies.
///
/// Every call is a single request with a single structured response.
/// Implementations hand back content that already passed validation.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Fetch one ordered quiz set.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the response is missing or malformed.
    async fn fetch_quiz(&self) -> Result<Vec<QuizQuestion>, ProviderError>;

    /// # Errors
    ///
    /// Returns `ProviderError` when the response is missing or malformed.
    async fn fetch_scenario(&self) -> Result<DrivingScenario, ProviderError>;

    /// Fetch a remedial card for a missed question.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the response is missing or malformed.
    async fn fetch_flashcard(&self, topic: &str) -> Result<Flashcard, ProviderError>;

    /// Ask the coach. `history` is the conversation before `message`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the call fails.
    async fn fetch_coach_reply(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, ProviderError>;
}
