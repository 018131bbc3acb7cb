//! Road sign category drill over the built-in sign catalog.

use tracing::debug;

use academy_core::model::{ROAD_SIGNS, RoadSign, SignCategory};

use crate::error::SignDrillError;

/// Feedback for one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignFeedback {
    pub is_correct: bool,
    pub message: String,
}

impl SignFeedback {
    fn for_guess(sign: &RoadSign, is_correct: bool) -> Self {
        let message = if is_correct {
            format!("Correct! This is a {} sign.", sign.category)
        } else {
            format!("Not quite. This is actually a {} sign.", sign.category)
        };
        Self {
            is_correct,
            message,
        }
    }
}

/// Where `next` moved the drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignStep {
    Next { index: usize },
    Completed { score: usize, total: usize },
}

/// Guess-the-category drill. One guess per sign, no XP.
#[derive(Debug, Clone)]
pub struct SignDrill {
    signs: &'static [RoadSign],
    index: usize,
    feedback: Option<SignFeedback>,
    score: usize,
    completed: bool,
}

impl SignDrill {
    #[must_use]
    pub fn new() -> Self {
        Self::with_signs(&ROAD_SIGNS)
    }

    #[must_use]
    pub fn with_signs(signs: &'static [RoadSign]) -> Self {
        Self {
            signs,
            index: 0,
            feedback: None,
            score: 0,
            completed: signs.is_empty(),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&RoadSign> {
        if self.completed {
            return None;
        }
        self.signs.get(self.index)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.signs.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&SignFeedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// # Errors
    ///
    /// Returns `SignDrillError::AlreadyGuessed` for a second guess on the same
    /// sign and `SignDrillError::Completed` after the last sign.
    pub fn guess(&mut self, category: SignCategory) -> Result<&SignFeedback, SignDrillError> {
        if self.feedback.is_some() {
            return Err(SignDrillError::AlreadyGuessed);
        }
        let sign = *self.current().ok_or(SignDrillError::Completed)?;
        let is_correct = sign.category == category;
        let feedback = SignFeedback::for_guess(&sign, is_correct);
        if is_correct {
            self.score += 1;
        }
        debug!(sign = sign.id, guess = %category, is_correct, "sign guessed");
        Ok(self.feedback.insert(feedback))
    }

    /// # Errors
    ///
    /// Returns `SignDrillError::NotGuessed` before the current sign is guessed.
    pub fn next(&mut self) -> Result<SignStep, SignDrillError> {
        if self.completed {
            return Err(SignDrillError::Completed);
        }
        if self.feedback.is_none() {
            return Err(SignDrillError::NotGuessed);
        }
        self.feedback = None;
        if self.index + 1 < self.signs.len() {
            self.index += 1;
            return Ok(SignStep::Next { index: self.index });
        }
        self.completed = true;
        Ok(SignStep::Completed {
            score: self.score,
            total: self.signs.len(),
        })
    }

    /// # Errors
    ///
    /// Returns `SignDrillError::NotCompleted` mid-drill.
    pub fn restart(&mut self) -> Result<(), SignDrillError> {
        if !self.completed {
            return Err(SignDrillError::NotCompleted);
        }
        *self = Self::with_signs(self.signs);
        Ok(())
    }
}

impl Default for SignDrill {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_score_and_give_feedback() {
        let mut drill = SignDrill::new();
        assert_eq!(drill.current().unwrap().id, "stop");

        let feedback = drill.guess(SignCategory::Regulatory).unwrap();
        assert!(feedback.is_correct);
        assert_eq!(feedback.message, "Correct! This is a Regulatory sign.");
        assert_eq!(drill.guess(SignCategory::Guide), Err(SignDrillError::AlreadyGuessed));
        assert_eq!(drill.score(), 1);

        assert_eq!(drill.next(), Ok(SignStep::Next { index: 1 }));
        let feedback = drill.guess(SignCategory::Warning).unwrap();
        assert_eq!(feedback.message, "Not quite. This is actually a Regulatory sign.");
        assert_eq!(drill.score(), 1);
    }

    #[test]
    fn next_requires_guess() {
        let mut drill = SignDrill::new();
        assert_eq!(drill.next(), Err(SignDrillError::NotGuessed));
    }

    #[test]
    fn perfect_run_completes_and_restarts() {
        let mut drill = SignDrill::new();
        assert_eq!(drill.restart(), Err(SignDrillError::NotCompleted));
        let mut last = None;
        for sign in ROAD_SIGNS {
            drill.guess(sign.category).unwrap();
            last = Some(drill.next().unwrap());
        }
        assert_eq!(last, Some(SignStep::Completed { score: 6, total: 6 }));
        assert!(drill.current().is_none());
        assert_eq!(drill.guess(SignCategory::Guide), Err(SignDrillError::Completed));

        drill.restart().unwrap();
        assert_eq!(drill.score(), 0);
        assert_eq!(drill.current().unwrap().id, "stop");
    }
}
