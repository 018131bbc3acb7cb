use serde::Deserialize;

use academy_core::ContentError;
use academy_core::model::{DrivingScenario, Flashcard, QuizQuestion, validate_quiz};

use crate::error::ProviderError;

/// Validate a quiz set exactly as received.
///
/// # Errors
///
/// Returns `ProviderError::InvalidContent` for an empty set or a malformed question.
pub fn checked_quiz(questions: Vec<QuizQuestion>) -> Result<Vec<QuizQuestion>, ProviderError> {
    validate_quiz(&questions)?;
    Ok(questions)
}

/// Validate a scenario, naming it if the provider left the id out.
///
/// # Errors
///
/// Returns `ProviderError::InvalidContent` if the scenario cannot be played.
pub fn checked_scenario(scenario: DrivingScenario) -> Result<DrivingScenario, ProviderError> {
    scenario.validate().map_err(ContentError::from)?;
    Ok(scenario.with_id_or_generated())
}

/// # Errors
///
/// Returns `ProviderError::InvalidContent` if either face is blank.
pub fn checked_flashcard(card: Flashcard) -> Result<Flashcard, ProviderError> {
    card.validate().map_err(ContentError::from)?;
    Ok(card.with_id_or_generated())
}

/// Quiz payloads arrive either as a bare array or wrapped in `{"questions": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuizPayload {
    Bare(Vec<QuizQuestion>),
    Wrapped { questions: Vec<QuizQuestion> },
}

pub(crate) fn decode_quiz(raw: &str) -> Result<Vec<QuizQuestion>, ProviderError> {
    let payload: QuizPayload = serde_json::from_str(json_body(raw)?)?;
    let questions = match payload {
        QuizPayload::Bare(questions) | QuizPayload::Wrapped { questions } => questions,
    };
    checked_quiz(questions)
}

pub(crate) fn decode_scenario(raw: &str) -> Result<DrivingScenario, ProviderError> {
    checked_scenario(serde_json::from_str(json_body(raw)?)?)
}

pub(crate) fn decode_flashcard(raw: &str) -> Result<Flashcard, ProviderError> {
    checked_flashcard(serde_json::from_str(json_body(raw)?)?)
}

/// Strip whitespace and an optional markdown code fence around a JSON body.
fn json_body(raw: &str) -> Result<&str, ProviderError> {
    let mut body = raw.trim();
    if let Some(rest) = body.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        body = rest.strip_suffix("```").unwrap_or(rest).trim();
    }
    if body.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTION: &str = r#"{"question":"Under-21 OVI limit?","options":["0.00%","0.02%","0.05%","0.08%"],"correctIndex":1,"explanation":"Ohio sets 0.02% for drivers under 21."}"#;

    #[test]
    fn decodes_bare_array_and_wrapped_object() {
        let bare = format!("[{QUESTION}]");
        assert_eq!(decode_quiz(&bare).unwrap().len(), 1);

        let wrapped = format!(r#"{{"questions":[{QUESTION},{QUESTION}]}}"#);
        assert_eq!(decode_quiz(&wrapped).unwrap().len(), 2);
    }

    #[test]
    fn strips_markdown_fence() {
        let fenced = format!("```json\n[{QUESTION}]\n```");
        let questions = decode_quiz(&fenced).unwrap();
        assert_eq!(questions[0].correct_index, 1);
    }

    #[test]
    fn empty_body_is_empty_response() {
        assert!(matches!(decode_quiz("   "), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn empty_quiz_is_invalid_content() {
        assert!(matches!(
            decode_quiz("[]"),
            Err(ProviderError::InvalidContent(ContentError::EmptyQuiz))
        ));
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(decode_scenario("not json"), Err(ProviderError::Decode(_))));
    }

    #[test]
    fn flashcard_without_id_gets_one() {
        let card = decode_flashcard(r#"{"front":"S.E.E.","back":"Search, Evaluate, Execute","category":"Strategy"}"#)
            .unwrap();
        assert!(!card.id.is_blank());
        assert_eq!(card.category, "Strategy");
    }

    #[test]
    fn flashcard_with_blank_back_is_rejected() {
        let err = decode_flashcard(r#"{"id":"x","front":"S.E.E.","back":" ","category":"Strategy"}"#)
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidContent(ContentError::Flashcard(_))));
    }
}
