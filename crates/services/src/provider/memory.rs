use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::warn;

use academy_core::model::{ChatMessage, DrivingScenario, Flashcard, QuizQuestion};

use super::content::{checked_flashcard, checked_quiz, checked_scenario};
use super::{ContentProvider, samples};
use crate::error::ProviderError;

/// One scripted answer: a response, or a failed call.
#[derive(Debug, Clone)]
enum Scripted<T> {
    Respond(T),
    Fail,
}

#[derive(Default)]
struct Script {
    quizzes: VecDeque<Scripted<Vec<QuizQuestion>>>,
    scenarios: VecDeque<Scripted<DrivingScenario>>,
    flashcards: VecDeque<Scripted<Flashcard>>,
    replies: VecDeque<Scripted<String>>,
    /// Serve built-in content once a queue runs dry instead of failing.
    samples: bool,
    /// Cap on the built-in quiz set.
    sample_quiz_size: Option<usize>,
    scenario_cursor: usize,
    flashcard_topics: Vec<String>,
    coach_histories: Vec<usize>,
}

/// Scripted provider for tests and offline play.
///
/// Responses are served in the order they were pushed. An exhausted queue
/// fails with `ProviderError::EmptyResponse` unless sample content is enabled.
#[derive(Clone, Default)]
pub struct InMemoryContentProvider {
    script: Arc<Mutex<Script>>,
}

impl InMemoryContentProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that never runs dry, backed by built-in Ohio content.
    #[must_use]
    pub fn with_sample_content() -> Self {
        let provider = Self::new();
        if let Ok(mut script) = provider.script.lock() {
            script.samples = true;
        }
        provider
    }

    /// Serve at most `size` built-in questions per quiz.
    ///
    /// The built-in set is fixed, so a larger request is served in full and
    /// logged.
    #[must_use]
    pub fn with_sample_quiz_size(self, size: usize) -> Self {
        let available = samples::quiz().len();
        if size > available {
            warn!(requested = size, available, "built-in quiz set is smaller than requested");
        }
        self.with_script(|s| s.sample_quiz_size = Some(size.max(1)));
        self
    }

    pub fn push_quiz(&self, questions: Vec<QuizQuestion>) {
        self.with_script(|s| s.quizzes.push_back(Scripted::Respond(questions)));
    }

    pub fn push_quiz_failure(&self) {
        self.with_script(|s| s.quizzes.push_back(Scripted::Fail));
    }

    pub fn push_scenario(&self, scenario: DrivingScenario) {
        self.with_script(|s| s.scenarios.push_back(Scripted::Respond(scenario)));
    }

    pub fn push_scenario_failure(&self) {
        self.with_script(|s| s.scenarios.push_back(Scripted::Fail));
    }

    pub fn push_flashcard(&self, card: Flashcard) {
        self.with_script(|s| s.flashcards.push_back(Scripted::Respond(card)));
    }

    pub fn push_flashcard_failure(&self) {
        self.with_script(|s| s.flashcards.push_back(Scripted::Fail));
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        let reply = reply.into();
        self.with_script(|s| s.replies.push_back(Scripted::Respond(reply)));
    }

    pub fn push_reply_failure(&self) {
        self.with_script(|s| s.replies.push_back(Scripted::Fail));
    }

    /// Topics flashcards were requested for, in call order.
    #[must_use]
    pub fn flashcard_topics(&self) -> Vec<String> {
        self.script
            .lock()
            .map(|s| s.flashcard_topics.clone())
            .unwrap_or_default()
    }

    /// History lengths passed to each coach call, in call order.
    #[must_use]
    pub fn coach_history_lengths(&self) -> Vec<usize> {
        self.script
            .lock()
            .map(|s| s.coach_histories.clone())
            .unwrap_or_default()
    }

    fn with_script(&self, f: impl FnOnce(&mut Script)) {
        if let Ok(mut script) = self.script.lock() {
            f(&mut script);
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Script>, ProviderError> {
        self.script
            .lock()
            .map_err(|e| ProviderError::Unavailable(e.to_string()))
    }
}

fn take<T>(
    queue: &mut VecDeque<Scripted<T>>,
    fallback: Option<impl FnOnce() -> T>,
) -> Result<T, ProviderError> {
    match queue.pop_front() {
        Some(Scripted::Respond(value)) => Ok(value),
        Some(Scripted::Fail) => Err(ProviderError::EmptyResponse),
        None => fallback.map(|f| f()).ok_or(ProviderError::EmptyResponse),
    }
}

#[async_trait]
impl ContentProvider for InMemoryContentProvider {
    async fn fetch_quiz(&self) -> Result<Vec<QuizQuestion>, ProviderError> {
        let questions = {
            let mut script = self.lock()?;
            let limit = script.sample_quiz_size;
            let fallback = script.samples.then_some(|| {
                let mut questions = samples::quiz();
                if let Some(limit) = limit {
                    questions.truncate(limit);
                }
                questions
            });
            take(&mut script.quizzes, fallback)?
        };
        checked_quiz(questions)
    }

    async fn fetch_scenario(&self) -> Result<DrivingScenario, ProviderError> {
        let scenario = {
            let mut script = self.lock()?;
            let script = &mut *script;
            let cursor = script.scenario_cursor;
            let fallback = script.samples.then_some(|| {
                let pool = samples::scenarios();
                pool[cursor % pool.len()].clone()
            });
            let scenario = take(&mut script.scenarios, fallback)?;
            script.scenario_cursor += 1;
            scenario
        };
        checked_scenario(scenario)
    }

    async fn fetch_flashcard(&self, topic: &str) -> Result<Flashcard, ProviderError> {
        let card = {
            let mut script = self.lock()?;
            script.flashcard_topics.push(topic.to_string());
            let fallback = script.samples.then_some(|| samples::flashcard(topic));
            take(&mut script.flashcards, fallback)?
        };
        checked_flashcard(card)
    }

    async fn fetch_coach_reply(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, ProviderError> {
        let mut script = self.lock()?;
        script.coach_histories.push(history.len());
        let fallback = script.samples.then_some(|| samples::coach_reply(message));
        take(&mut script.replies, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_quiz_respects_requested_size() {
        let provider = InMemoryContentProvider::with_sample_content().with_sample_quiz_size(3);
        assert_eq!(provider.fetch_quiz().await.unwrap().len(), 3);

        let provider = InMemoryContentProvider::with_sample_content().with_sample_quiz_size(12);
        assert_eq!(provider.fetch_quiz().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn exhausted_queue_fails_without_samples() {
        let provider = InMemoryContentProvider::new();
        assert!(matches!(provider.fetch_quiz().await, Err(ProviderError::EmptyResponse)));
        assert!(matches!(
            provider.fetch_flashcard("Yield").await,
            Err(ProviderError::EmptyResponse)
        ));
        assert_eq!(provider.flashcard_topics(), vec!["Yield".to_string()]);
    }

    #[tokio::test]
    async fn scripted_responses_come_back_in_order() {
        let provider = InMemoryContentProvider::new();
        provider.push_reply("first");
        provider.push_reply_failure();
        provider.push_reply("third");

        assert_eq!(provider.fetch_coach_reply("a", &[]).await.unwrap(), "first");
        assert!(provider.fetch_coach_reply("b", &[]).await.is_err());
        assert_eq!(provider.fetch_coach_reply("c", &[]).await.unwrap(), "third");
        assert_eq!(provider.coach_history_lengths(), vec![0, 0, 0]);
    }

    #[tokio::test]
    async fn samples_rotate_scenarios_and_never_run_dry() {
        let provider = InMemoryContentProvider::with_sample_content();
        let first = provider.fetch_scenario().await.unwrap();
        let second = provider.fetch_scenario().await.unwrap();
        let third = provider.fetch_scenario().await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.id, third.id);
        assert_eq!(provider.fetch_quiz().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn invalid_scripted_content_is_rejected() {
        let provider = InMemoryContentProvider::new();
        provider.push_quiz(Vec::new());
        assert!(matches!(
            provider.fetch_quiz().await,
            Err(ProviderError::InvalidContent(_))
        ));
    }
}
