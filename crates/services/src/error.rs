//! Shared error types for the services crate.

use thiserror::Error;

use academy_core::ContentError;

/// Failure of a content provider round trip: absent, malformed, or failed call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("content provider is not configured")]
    Disabled,
    #[error("content provider returned an empty response")]
    EmptyResponse,
    #[error("content provider request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("content provider returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("content provider returned invalid content: {0}")]
    InvalidContent(#[from] ContentError),
    #[error("content provider unavailable: {0}")]
    Unavailable(String),
}

/// Rejected transitions of the theory quiz machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz is still loading")]
    Loading,
    #[error("quiz has no active question")]
    NotActive,
    #[error("current question was already answered")]
    AlreadyAnswered,
    #[error("current question has not been answered yet")]
    NotAnswered,
    #[error("option {index} does not exist ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("quiz is not completed")]
    NotCompleted,
    #[error("a quiz is already in progress")]
    InProgress,
    #[error("quiz is completed; restart it for a new set")]
    AlreadyCompleted,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Rejected transitions of the scenario machine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScenarioError {
    #[error("scenario is still loading")]
    Loading,
    #[error("no scenario is active")]
    NotActive,
    #[error("a choice was already made for this scenario")]
    AlreadyChosen,
    #[error("no choice has been made for this scenario")]
    NotChosen,
    #[error("option {index} does not exist ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Rejected moves in the road sign drill.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SignDrillError {
    #[error("this sign was already guessed")]
    AlreadyGuessed,
    #[error("guess the current sign first")]
    NotGuessed,
    #[error("drill is completed")]
    Completed,
    #[error("drill is not completed")]
    NotCompleted,
}
