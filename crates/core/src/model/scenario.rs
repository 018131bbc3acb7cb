use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ScenarioId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScenarioContentError {
    #[error("scenario field `{field}` is empty")]
    EmptyText { field: &'static str },

    #[error("scenario has no options")]
    NoOptions,

    #[error("scenario option {index} has no text")]
    EmptyOption { index: usize },
}

/// One possible action in a driving scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOption {
    pub text: String,
    pub is_correct: bool,
    pub feedback: String,
}

/// A "Search, Evaluate, Execute" road situation with branching choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrivingScenario {
    #[serde(default)]
    pub id: ScenarioId,
    pub context: String,
    pub image_description: String,
    pub options: Vec<ScenarioOption>,
}

impl DrivingScenario {
    /// # Errors
    ///
    /// Returns `ScenarioContentError` when the context or options are unusable.
    pub fn validate(&self) -> Result<(), ScenarioContentError> {
        if self.context.trim().is_empty() {
            return Err(ScenarioContentError::EmptyText { field: "context" });
        }
        if self.options.is_empty() {
            return Err(ScenarioContentError::NoOptions);
        }
        if let Some(index) = self.options.iter().position(|o| o.text.trim().is_empty()) {
            return Err(ScenarioContentError::EmptyOption { index });
        }
        Ok(())
    }

    /// Replace a missing provider id with a generated one.
    #[must_use]
    pub fn with_id_or_generated(mut self) -> Self {
        if self.id.is_blank() {
            self.id = ScenarioId::generate();
        }
        self
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&ScenarioOption> {
        self.options.get(index)
    }
}
