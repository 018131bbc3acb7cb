use academy_core::model::QuizQuestion;
use services::quiz::{AnswerOutcome, AnswerReport, Remediation};
use services::QuizSession;

const LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    /// One-based.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
}

impl QuestionVm {
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Question {} of {}", self.number, self.total), self.prompt.clone()];
        lines.extend(self.options.iter().cloned());
        lines
    }
}

#[must_use]
pub fn option_letter(index: usize) -> char {
    LETTERS.get(index).copied().unwrap_or('?')
}

/// Accepts a letter (`b`) or a one-based number (`2`).
#[must_use]
pub fn parse_option(input: &str, len: usize) -> Option<usize> {
    let input = input.trim();
    let index = match input.parse::<usize>() {
        Ok(n) => n.checked_sub(1)?,
        Err(_) => {
            let mut chars = input.chars();
            let c = chars.next()?.to_ascii_uppercase();
            if chars.next().is_some() {
                return None;
            }
            LETTERS.iter().position(|l| *l == c)?
        }
    };
    (index < len).then_some(index)
}

#[must_use]
pub fn map_question(quiz: &QuizSession) -> Option<QuestionVm> {
    let (index, question) = quiz.current()?;
    Some(QuestionVm {
        number: index + 1,
        total: quiz.total(),
        prompt: question.question.clone(),
        options: question
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| format!("  {}) {text}", option_letter(i)))
            .collect(),
    })
}

/// Lines shown right after an answer is committed.
#[must_use]
pub fn answer_feedback(question: &QuizQuestion, report: &AnswerReport) -> Vec<String> {
    let mut lines = Vec::new();
    match &report.outcome {
        AnswerOutcome::Correct { reward } => {
            lines.push(format!("Correct! +{} XP", reward.points()));
        }
        AnswerOutcome::Incorrect { .. } => {
            let answer = question.correct_option().unwrap_or_default();
            lines.push(format!(
                "Not quite. The answer is {}) {answer}",
                option_letter(question.correct_index)
            ));
        }
    }
    lines.push(question.explanation.clone());
    match report.remediation {
        Some(Remediation::Queued { queue_len }) => {
            lines.push(format!("Added a review card ({queue_len} queued)."));
        }
        Some(Remediation::Dropped) | None => {}
    }
    lines
}
