use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::FlashcardId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlashcardError {
    #[error("flashcard {side} is empty")]
    EmptySide { side: &'static str },
}

/// A remedial study card produced for a missed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default)]
    pub id: FlashcardId,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub category: String,
}

impl Flashcard {
    #[must_use]
    pub fn new(
        id: FlashcardId,
        front: impl Into<String>,
        back: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            category: category.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `FlashcardError::EmptySide` if either face has no text.
    pub fn validate(&self) -> Result<(), FlashcardError> {
        if self.front.trim().is_empty() {
            return Err(FlashcardError::EmptySide { side: "front" });
        }
        if self.back.trim().is_empty() {
            return Err(FlashcardError::EmptySide { side: "back" });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_id_or_generated(mut self) -> Self {
        if self.id.is_blank() {
            self.id = FlashcardId::generate();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_provider_card_and_keeps_id() {
        let json = r#"{"id":"ovi-1","front":"OVI limit under 21","back":"0.02% BAC","category":"OVI"}"#;
        let card: Flashcard = serde_json::from_str(json).unwrap();
        assert!(card.validate().is_ok());
        assert_eq!(card.clone().with_id_or_generated().id, card.id);
    }

    #[test]
    fn empty_back_is_rejected() {
        let card = Flashcard::new(FlashcardId::new("x"), "Front", "", "General");
        assert_eq!(card.validate(), Err(FlashcardError::EmptySide { side: "back" }));
    }
}
