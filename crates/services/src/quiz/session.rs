use std::fmt;

use tracing::{debug, warn};

use academy_core::model::QuizQuestion;
use academy_core::reward::XpReward;

use crate::error::{ProviderError, QuizError};
use crate::generation::{Generation, GenerationCounter, LoadOutcome, LoadTicket};

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where the quiz machine is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    /// A quiz set has been requested and not yet applied.
    Loading,
    /// The last request failed. Nothing advances until a new load is issued.
    Failed { reason: String },
    /// Question `index` is showing; `selection` is set once an answer is committed.
    Active {
        index: usize,
        selection: Option<usize>,
    },
    Completed(QuizResult),
}

/// Final score of one quiz pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub correct_count: usize,
    pub total: usize,
}

impl QuizResult {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct_count == self.total
    }
}

/// Outcome of committing an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { reward: XpReward },
    /// Wrong answer; `topic` keys the remediation request.
    Incorrect { topic: String },
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }
}

/// What `advance` moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStep {
    Next { index: usize },
    Completed(QuizResult),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Theory quiz state machine over one provider-ordered question set.
///
/// `Loading → Active(i, None) → Active(i, Some) → Active(i + 1, None) | Completed`.
/// Every load is tied to a generation ticket; a response for an older
/// generation is discarded.
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    state: QuizState,
    correct_count: usize,
    generations: GenerationCounter,
}

impl QuizSession {
    /// A fresh machine in `Loading` with no request issued yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            state: QuizState::Loading,
            correct_count: 0,
            generations: GenerationCounter::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generations.current()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, QuizState::Loading)
    }

    /// Index and question currently showing.
    #[must_use]
    pub fn current(&self) -> Option<(usize, &QuizQuestion)> {
        match self.state {
            QuizState::Active { index, .. } => self.questions.get(index).map(|q| (index, q)),
            _ => None,
        }
    }

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        match self.state {
            QuizState::Active { selection, .. } => selection,
            _ => None,
        }
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        match self.state {
            QuizState::Completed(result) => Some(result),
            _ => None,
        }
    }

    /// Issue a quiz request: first load, or retry after `Failed`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InProgress` while a question is showing and
    /// `QuizError::AlreadyCompleted` on a finished pass, which only `restart` leaves.
    pub fn begin_load(&mut self) -> Result<LoadTicket, QuizError> {
        match self.state {
            QuizState::Loading | QuizState::Failed { .. } => Ok(self.reset_and_issue()),
            QuizState::Active { .. } => Err(QuizError::InProgress),
            QuizState::Completed(_) => Err(QuizError::AlreadyCompleted),
        }
    }

    /// Leave `Completed`, clear the score and request a new set.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotCompleted` unless the pass is finished.
    pub fn restart(&mut self) -> Result<LoadTicket, QuizError> {
        if !matches!(self.state, QuizState::Completed(_)) {
            return Err(QuizError::NotCompleted);
        }
        Ok(self.reset_and_issue())
    }

    /// Apply a provider response for `ticket`.
    ///
    /// A response whose ticket is no longer current, or that arrives when the
    /// machine is not loading, is dropped and reported as `LoadOutcome::Stale`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Provider` after moving to `Failed` when the request failed.
    pub fn apply_loaded(
        &mut self,
        ticket: LoadTicket,
        response: Result<Vec<QuizQuestion>, ProviderError>,
    ) -> Result<LoadOutcome, QuizError> {
        if !self.generations.is_current(ticket) || !self.is_loading() {
            warn!(
                stale = ?ticket.generation(),
                current = ?self.generations.current(),
                "discarding stale quiz response"
            );
            return Ok(LoadOutcome::Stale);
        }

        match response {
            Ok(questions) if questions.is_empty() => {
                self.fail(&ProviderError::EmptyResponse);
                Err(ProviderError::EmptyResponse.into())
            }
            Ok(questions) => {
                debug!(total = questions.len(), "quiz set applied");
                self.questions = questions;
                self.correct_count = 0;
                self.state = QuizState::Active {
                    index: 0,
                    selection: None,
                };
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                self.fail(&err);
                Err(err.into())
            }
        }
    }

    /// Commit an answer for the current question. Only the first answer counts.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyAnswered` for a second answer,
    /// `QuizError::OptionOutOfRange` for an unknown option, and
    /// `QuizError::Loading`/`QuizError::NotActive` outside an active question.
    /// A rejected call leaves the machine untouched.
    pub fn submit_answer(&mut self, option: usize) -> Result<AnswerOutcome, QuizError> {
        let (index, selection) = self.active_position()?;
        if selection.is_some() {
            return Err(QuizError::AlreadyAnswered);
        }
        let question = self.questions.get(index).ok_or(QuizError::NotActive)?;
        if question.option(option).is_none() {
            return Err(QuizError::OptionOutOfRange {
                index: option,
                len: question.options.len(),
            });
        }

        let outcome = if question.is_correct(option) {
            AnswerOutcome::Correct {
                reward: XpReward::QUIZ_CORRECT,
            }
        } else {
            AnswerOutcome::Incorrect {
                topic: question.topic().to_string(),
            }
        };
        if outcome.is_correct() {
            self.correct_count += 1;
        }
        self.state = QuizState::Active {
            index,
            selection: Some(option),
        };
        debug!(index, option, correct = outcome.is_correct(), "quiz answer committed");
        Ok(outcome)
    }

    /// Move past an answered question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswered` before an answer is committed.
    pub fn advance(&mut self) -> Result<QuizStep, QuizError> {
        let (index, selection) = self.active_position()?;
        if selection.is_none() {
            return Err(QuizError::NotAnswered);
        }

        let next = index + 1;
        if next < self.questions.len() {
            self.state = QuizState::Active {
                index: next,
                selection: None,
            };
            return Ok(QuizStep::Next { index: next });
        }

        let result = QuizResult {
            correct_count: self.correct_count.min(self.questions.len()),
            total: self.questions.len(),
        };
        self.state = QuizState::Completed(result);
        debug!(correct = result.correct_count, total = result.total, "quiz completed");
        Ok(QuizStep::Completed(result))
    }

    fn active_position(&self) -> Result<(usize, Option<usize>), QuizError> {
        match self.state {
            QuizState::Active { index, selection } => Ok((index, selection)),
            QuizState::Loading => Err(QuizError::Loading),
            QuizState::Failed { .. } | QuizState::Completed(_) => Err(QuizError::NotActive),
        }
    }

    fn reset_and_issue(&mut self) -> LoadTicket {
        self.questions.clear();
        self.correct_count = 0;
        self.state = QuizState::Loading;
        let ticket = self.generations.issue();
        debug!(generation = ?ticket.generation(), "quiz load issued");
        ticket
    }

    fn fail(&mut self, err: &ProviderError) {
        warn!(error = %err, "quiz load failed");
        self.state = QuizState::Failed {
            reason: err.to_string(),
        };
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("state", &self.state)
            .field("correct_count", &self.correct_count)
            .field("generation", &self.generations.current())
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(n: usize, correct_index: usize) -> QuizQuestion {
        QuizQuestion::new(
            format!("Question {n}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index,
            "because",
        )
        .unwrap()
    }

    fn loaded(n: usize) -> QuizSession {
        let mut quiz = QuizSession::new();
        let ticket = quiz.begin_load().unwrap();
        let questions = (0..n).map(|i| question(i, 0)).collect();
        assert_eq!(quiz.apply_loaded(ticket, Ok(questions)).unwrap(), LoadOutcome::Applied);
        quiz
    }

    #[test]
    fn starts_loading_and_activates_first_question() {
        let quiz = loaded(3);
        assert_eq!(quiz.state(), &QuizState::Active { index: 0, selection: None });
        assert_eq!(quiz.current().unwrap().1.question, "Question 0");
    }

    #[test]
    fn second_answer_is_rejected_without_effect() {
        let mut quiz = loaded(2);
        assert!(!quiz.submit_answer(2).unwrap().is_correct());

        let err = quiz.submit_answer(0).unwrap_err();
        assert!(matches!(err, QuizError::AlreadyAnswered));
        assert_eq!(quiz.selection(), Some(2));
        assert_eq!(quiz.correct_count(), 0);
    }

    #[test]
    fn out_of_range_option_leaves_question_open() {
        let mut quiz = loaded(1);
        let err = quiz.submit_answer(4).unwrap_err();
        assert!(matches!(err, QuizError::OptionOutOfRange { index: 4, len: 4 }));
        assert_eq!(quiz.selection(), None);
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut quiz = loaded(2);
        assert!(matches!(quiz.advance().unwrap_err(), QuizError::NotAnswered));
    }

    #[test]
    fn completes_with_correct_count() {
        let mut quiz = loaded(5);
        for (i, option) in [0, 1, 0, 3, 0].into_iter().enumerate() {
            quiz.submit_answer(option).unwrap();
            let step = quiz.advance().unwrap();
            if i < 4 {
                assert_eq!(step, QuizStep::Next { index: i + 1 });
            }
        }
        let result = quiz.result().unwrap();
        assert_eq!(result, QuizResult { correct_count: 3, total: 5 });
        assert!(!result.is_perfect());
        assert_eq!(quiz.selection(), None);
    }

    #[test]
    fn restart_only_from_completed_and_resets_score() {
        let mut quiz = loaded(1);
        assert!(matches!(quiz.restart().unwrap_err(), QuizError::NotCompleted));

        quiz.submit_answer(0).unwrap();
        quiz.advance().unwrap();
        assert!(quiz.result().unwrap().is_perfect());

        assert!(matches!(quiz.begin_load().unwrap_err(), QuizError::AlreadyCompleted));
        assert!(quiz.result().unwrap().is_perfect());

        let ticket = quiz.restart().unwrap();
        assert!(quiz.is_loading());
        assert_eq!(quiz.correct_count(), 0);
        assert_eq!(quiz.total(), 0);
        quiz.apply_loaded(ticket, Ok(vec![question(9, 1)])).unwrap();
        assert_eq!(quiz.current().unwrap().0, 0);
    }

    #[test]
    fn failed_load_does_not_advance_and_allows_retry() {
        let mut quiz = QuizSession::new();
        let ticket = quiz.begin_load().unwrap();
        let err = quiz
            .apply_loaded(ticket, Err(ProviderError::EmptyResponse))
            .unwrap_err();
        assert!(matches!(err, QuizError::Provider(ProviderError::EmptyResponse)));
        assert!(matches!(quiz.state(), QuizState::Failed { .. }));
        assert!(matches!(quiz.submit_answer(0).unwrap_err(), QuizError::NotActive));

        let retry = quiz.begin_load().unwrap();
        quiz.apply_loaded(retry, Ok(vec![question(1, 0)])).unwrap();
        assert!(quiz.current().is_some());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut quiz = QuizSession::new();
        let stale = quiz.begin_load().unwrap();
        let fresh = quiz.begin_load().unwrap();

        quiz.apply_loaded(fresh, Ok(vec![question(1, 0)])).unwrap();
        let outcome = quiz
            .apply_loaded(stale, Ok(vec![question(2, 0), question(3, 0)]))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(quiz.total(), 1);
        assert_eq!(quiz.current().unwrap().1.question, "Question 1");
    }

    #[test]
    fn stale_failure_does_not_fail_fresh_session() {
        let mut quiz = QuizSession::new();
        let stale = quiz.begin_load().unwrap();
        let fresh = quiz.begin_load().unwrap();
        assert_eq!(
            quiz.apply_loaded(stale, Err(ProviderError::EmptyResponse)).unwrap(),
            LoadOutcome::Stale
        );
        assert!(quiz.is_loading());
        quiz.apply_loaded(fresh, Ok(vec![question(1, 0)])).unwrap();
        assert!(quiz.current().is_some());
    }

    #[test]
    fn cannot_reload_mid_quiz() {
        let mut quiz = loaded(2);
        assert!(matches!(quiz.begin_load().unwrap_err(), QuizError::InProgress));
        assert!(quiz.current().is_some());
    }
}
