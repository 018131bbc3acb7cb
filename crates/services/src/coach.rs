//! Coach Alex chat: free-form questions answered by the content provider.

use std::sync::Arc;

use tracing::{debug, warn};

use academy_core::Clock;
use academy_core::model::ChatMessage;

use crate::error::ProviderError;
use crate::provider::ContentProvider;

pub const COACH_GREETING: &str = "Beep beep! I'm Coach Alex. Giving you a big thumbs up as we start your driving journey! How can I help today?";
/// Shown when the provider answers with nothing.
pub const EMPTY_REPLY_FALLBACK: &str = "Brakes engaged! I couldn't process that. Try again?";
/// Shown when the provider call fails.
pub const FAILED_REPLY_FALLBACK: &str = "Stalled engine! Let's try again in a moment.";

/// A send accepted by the conversation, waiting on the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub message: String,
    /// Conversation before `message` was appended.
    pub history: Vec<ChatMessage>,
}

/// Transcript plus the in-flight flag.
#[derive(Debug, Clone)]
pub struct CoachConversation {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl CoachConversation {
    /// A conversation opened by the coach's greeting.
    #[must_use]
    pub fn new(clock: &Clock) -> Self {
        Self {
            messages: vec![ChatMessage::model(COACH_GREETING, clock.now())],
            pending: false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Accept a user message. Blank input, or a send while a reply is
    /// pending, is ignored and returns `None`.
    pub fn begin_send(&mut self, input: &str, clock: &Clock) -> Option<PendingSend> {
        if self.pending || input.trim().is_empty() {
            return None;
        }
        let history = self.messages.clone();
        self.messages.push(ChatMessage::user(input, clock.now()));
        self.pending = true;
        Some(PendingSend {
            message: input.to_string(),
            history,
        })
    }

    /// Record the coach's answer, substituting the fallback text for an
    /// empty reply or a failed call. Returns the appended message.
    pub fn finish(&mut self, reply: Result<String, ProviderError>, clock: &Clock) -> &ChatMessage {
        let text = match reply {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY_FALLBACK.to_string(),
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "coach reply failed");
                FAILED_REPLY_FALLBACK.to_string()
            }
        };
        self.pending = false;
        self.messages.push(ChatMessage::model(text, clock.now()));
        &self.messages[self.messages.len() - 1]
    }
}

/// Sends learner questions to the coach.
#[derive(Clone)]
pub struct CoachService {
    provider: Arc<dyn ContentProvider>,
    clock: Clock,
}

impl CoachService {
    #[must_use]
    pub fn new(provider: Arc<dyn ContentProvider>, clock: Clock) -> Self {
        Self { provider, clock }
    }

    #[must_use]
    pub fn start_conversation(&self) -> CoachConversation {
        CoachConversation::new(&self.clock)
    }

    /// Send `input` and wait for the reply. Returns the coach's message, or
    /// `None` when the input was ignored.
    pub async fn send<'c>(
        &self,
        conversation: &'c mut CoachConversation,
        input: &str,
    ) -> Option<&'c ChatMessage> {
        let pending = conversation.begin_send(input, &self.clock)?;
        debug!(history = pending.history.len(), "asking coach");
        let reply = self
            .provider
            .fetch_coach_reply(&pending.message, &pending.history)
            .await;
        Some(conversation.finish(reply, &self.clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::ChatRole;
    use academy_core::time::fixed_clock;

    use crate::provider::InMemoryContentProvider;

    #[test]
    fn conversation_opens_with_greeting() {
        let conversation = CoachConversation::new(&fixed_clock());
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, ChatRole::Model);
        assert_eq!(conversation.messages()[0].text, COACH_GREETING);
    }

    #[test]
    fn blank_and_overlapping_sends_are_ignored() {
        let clock = fixed_clock();
        let mut conversation = CoachConversation::new(&clock);
        assert!(conversation.begin_send("   ", &clock).is_none());

        let pending = conversation.begin_send("What is S.E.E.?", &clock).unwrap();
        assert_eq!(pending.history.len(), 1);
        assert!(conversation.is_pending());
        assert!(conversation.begin_send("hello?", &clock).is_none());
        assert_eq!(conversation.messages().len(), 2);
    }

    #[test]
    fn empty_reply_and_failure_become_fallbacks() {
        let clock = fixed_clock();
        let mut conversation = CoachConversation::new(&clock);
        conversation.begin_send("one", &clock).unwrap();
        assert_eq!(conversation.finish(Ok(" ".into()), &clock).text, EMPTY_REPLY_FALLBACK);
        assert!(!conversation.is_pending());

        conversation.begin_send("two", &clock).unwrap();
        let reply = conversation.finish(Err(ProviderError::Disabled), &clock);
        assert_eq!(reply.text, FAILED_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn service_sends_prior_history() {
        let provider = Arc::new(InMemoryContentProvider::new());
        provider.push_reply("Search, Evaluate, Execute.");
        provider.push_reply_failure();
        let service = CoachService::new(provider.clone(), fixed_clock());
        let mut conversation = service.start_conversation();

        let reply = service.send(&mut conversation, "What is S.E.E.?").await.unwrap();
        assert_eq!(reply.text, "Search, Evaluate, Execute.");
        let reply = service.send(&mut conversation, "And OVI?").await.unwrap();
        assert_eq!(reply.text, FAILED_REPLY_FALLBACK);
        assert!(service.send(&mut conversation, "").await.is_none());

        assert_eq!(provider.coach_history_lengths(), vec![1, 3]);
        assert_eq!(conversation.messages().len(), 5);
    }
}
