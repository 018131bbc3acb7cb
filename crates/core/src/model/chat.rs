use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One line of the coach conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            sent_at,
        }
    }

    #[must_use]
    pub fn model(text: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            sent_at,
        }
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}
