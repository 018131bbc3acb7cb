use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use academy_core::model::{ChatMessage as CoachMessage, ChatRole, DrivingScenario, Flashcard, QuizQuestion};

use super::content::{decode_flashcard, decode_quiz, decode_scenario};
use super::prompts;
use super::{ContentProvider, DEFAULT_QUIZ_SIZE};
use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_CONTENT_MODEL: &str = "gpt-4o";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for an OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub base_url: Url,
    pub api_key: String,
    /// Model for flashcards and coach replies.
    pub model: String,
    /// Model for quiz sets and scenarios.
    pub content_model: String,
    pub timeout: Duration,
    pub quiz_size: usize,
}

impl ProviderConfig {
    /// # Errors
    ///
    /// Returns `url::ParseError` if `base_url` is not a valid URL.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            content_model: DEFAULT_CONTENT_MODEL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            quiz_size: DEFAULT_QUIZ_SIZE,
        })
    }

    /// Read `ACADEMY_AI_*` variables. `None` when no usable API key or base URL is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("ACADEMY_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("ACADEMY_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let mut config = match Self::new(&base_url, api_key) {
            Ok(config) => config,
            Err(err) => {
                warn!(%base_url, error = %err, "ignoring provider config with invalid base url");
                return None;
            }
        };
        if let Ok(model) = env::var("ACADEMY_AI_MODEL") {
            config.model = model;
        }
        if let Ok(model) = env::var("ACADEMY_AI_CONTENT_MODEL") {
            config.content_model = model;
        }
        if let Some(secs) = env::var("ACADEMY_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(size) = quiz_size_from_env() {
            config.quiz_size = size;
        }
        Some(config)
    }

    #[must_use]
    pub fn with_quiz_size(mut self, quiz_size: usize) -> Self {
        self.quiz_size = quiz_size.max(1);
        self
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.base_url.as_str().trim_end_matches('/')
        )
    }
}

/// `ACADEMY_QUIZ_SIZE`, when set to a positive integer.
#[must_use]
pub fn quiz_size_from_env() -> Option<usize> {
    env::var("ACADEMY_QUIZ_SIZE")
        .ok()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|size| *size > 0)
}

/// Content provider backed by a remote chat completions API.
#[derive(Clone)]
pub struct HttpContentProvider {
    client: Client,
    config: Option<ProviderConfig>,
}

impl HttpContentProvider {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ProviderConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<ProviderConfig>) -> Self {
        let timeout = config
            .as_ref()
            .map_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS), |c| c.timeout);
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|err| {
            warn!(error = %err, "falling back to default http client");
            Client::new()
        });
        Self { client, config }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    #[must_use]
    pub fn config(&self) -> Option<&ProviderConfig> {
        self.config.as_ref()
    }

    async fn complete(&self, request: Completion<'_>) -> Result<String, ProviderError> {
        let config = self.config.as_ref().ok_or(ProviderError::Disabled)?;

        let model = if request.content {
            &config.content_model
        } else {
            &config.model
        };
        let payload = ChatRequest {
            model: model.clone(),
            messages: request.messages,
            temperature: request.temperature,
            response_format: request.json.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };
        debug!(model = %payload.model, messages = payload.messages.len(), "sending completion");

        let response = self
            .client
            .post(config.completions_url())
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }

    fn quiz_size(&self) -> usize {
        self.config.as_ref().map_or(DEFAULT_QUIZ_SIZE, |c| c.quiz_size)
    }
}

#[async_trait]
impl ContentProvider for HttpContentProvider {
    async fn fetch_quiz(&self) -> Result<Vec<QuizQuestion>, ProviderError> {
        let raw = self
            .complete(Completion::structured(prompts::quiz_prompt(self.quiz_size()), true))
            .await?;
        decode_quiz(&raw)
    }

    async fn fetch_scenario(&self) -> Result<DrivingScenario, ProviderError> {
        let raw = self
            .complete(Completion::structured(prompts::scenario_prompt(), true))
            .await?;
        decode_scenario(&raw)
    }

    async fn fetch_flashcard(&self, topic: &str) -> Result<Flashcard, ProviderError> {
        let raw = self
            .complete(Completion::structured(prompts::flashcard_prompt(topic), false))
            .await?;
        decode_flashcard(&raw)
    }

    async fn fetch_coach_reply(
        &self,
        message: &str,
        history: &[CoachMessage],
    ) -> Result<String, ProviderError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage {
            role: "system",
            content: prompts::coach_instruction(),
        });
        messages.extend(history.iter().map(|msg| ChatMessage {
            role: match msg.role {
                ChatRole::User => "user",
                ChatRole::Model => "assistant",
            },
            content: msg.text.clone(),
        }));
        messages.push(ChatMessage {
            role: "user",
            content: message.to_string(),
        });

        self.complete(Completion {
            messages,
            temperature: 0.7,
            json: false,
            content: false,
        })
        .await
    }
}

struct Completion<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    json: bool,
    /// Route to the heavier content model.
    content: bool,
}

impl Completion<'_> {
    fn structured(prompt: String, content: bool) -> Self {
        Self {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
            json: true,
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: String,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let config = ProviderConfig::new("https://llm.example.com/v1/", "key").unwrap();
        assert_eq!(config.completions_url(), "https://llm.example.com/v1/chat/completions");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(ProviderConfig::new("not a url", "key").is_err());
    }

    #[test]
    fn quiz_size_never_drops_to_zero() {
        let config = ProviderConfig::new(DEFAULT_BASE_URL, "key")
            .unwrap()
            .with_quiz_size(0);
        assert_eq!(config.quiz_size, 1);
    }

    #[test]
    fn json_mode_is_serialized_only_when_requested() {
        let request = ChatRequest {
            model: "m".into(),
            messages: Vec::new(),
            temperature: 0.2,
            response_format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("response_format").is_none());

        let request = ChatRequest {
            response_format: Some(ResponseFormat { kind: "json_object" }),
            ..request
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[tokio::test]
    async fn disabled_provider_fails_every_call() {
        let provider = HttpContentProvider::new(None);
        assert!(!provider.enabled());
        assert!(matches!(provider.fetch_quiz().await, Err(ProviderError::Disabled)));
        assert!(matches!(
            provider.fetch_coach_reply("hi", &[]).await,
            Err(ProviderError::Disabled)
        ));
    }
}
