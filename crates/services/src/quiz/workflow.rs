use std::sync::Arc;

use tracing::{info, warn};

use academy_core::reward::RewardOutcome;

use crate::error::QuizError;
use crate::generation::LoadOutcome;
use crate::learner::LearnerSession;
use crate::provider::ContentProvider;
use crate::quiz::session::{AnswerOutcome, QuizSession};

/// What happened to the remediation queue after a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// A card was queued; `queue_len` is the new length.
    Queued { queue_len: usize },
    /// The flashcard request failed and the miss was dropped.
    Dropped,
}

/// Result of answering one question through the loop service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReport {
    pub outcome: AnswerOutcome,
    pub reward: Option<RewardOutcome>,
    pub remediation: Option<Remediation>,
    /// True when the queue is now large enough to open review unprompted.
    pub open_review: bool,
}

/// Orchestrates quiz loading and answering against a content provider.
#[derive(Clone)]
pub struct QuizLoopService {
    provider: Arc<dyn ContentProvider>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self { provider }
    }

    /// Request a quiz set and apply it to `quiz`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the machine cannot load or the provider fails.
    pub async fn start(&self, quiz: &mut QuizSession) -> Result<LoadOutcome, QuizError> {
        let ticket = quiz.begin_load()?;
        let response = self.provider.fetch_quiz().await;
        quiz.apply_loaded(ticket, response)
    }

    /// Restart a completed quiz with a fresh set.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotCompleted` mid-quiz, or the provider failure.
    pub async fn restart(&self, quiz: &mut QuizSession) -> Result<LoadOutcome, QuizError> {
        let ticket = quiz.restart()?;
        let response = self.provider.fetch_quiz().await;
        quiz.apply_loaded(ticket, response)
    }

    /// Commit an answer, credit XP when correct and queue a remediation card when not.
    ///
    /// A failed flashcard request never fails the answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` when the answer is rejected by the machine.
    pub async fn answer(
        &self,
        quiz: &mut QuizSession,
        learner: &mut LearnerSession,
        option: usize,
    ) -> Result<AnswerReport, QuizError> {
        let outcome = quiz.submit_answer(option)?;

        let (reward, remediation) = match &outcome {
            AnswerOutcome::Correct { reward } => (Some(learner.apply_reward(*reward)), None),
            AnswerOutcome::Incorrect { topic } => {
                let remediation = match self.provider.fetch_flashcard(topic).await {
                    Ok(card) => Remediation::Queued {
                        queue_len: learner.append_flashcard(card),
                    },
                    Err(err) => {
                        warn!(error = %err, "remediation card request failed; miss dropped");
                        Remediation::Dropped
                    }
                };
                (None, Some(remediation))
            }
        };

        let open_review = learner.should_auto_open_review();
        if open_review {
            info!(queued = learner.remediation().len(), "remediation review ready");
        }

        Ok(AnswerReport {
            outcome,
            reward,
            remediation,
            open_review,
        })
    }
}
