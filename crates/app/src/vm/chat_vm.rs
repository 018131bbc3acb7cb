use academy_core::model::ChatMessage;

use super::time_fmt::format_clock;

/// `[14:05] You: ...` or `[14:05] Coach Alex: ...`.
#[must_use]
pub fn chat_line(message: &ChatMessage) -> String {
    let speaker = if message.is_user() { "You" } else { "Coach Alex" };
    format!("[{}] {speaker}: {}", format_clock(message.sent_at), message.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::time::fixed_now;

    #[test]
    fn labels_speaker_and_time() {
        let user = ChatMessage::user("What is S.E.E.?", fixed_now());
        assert_eq!(chat_line(&user), "[22:13] You: What is S.E.E.?");

        let coach = ChatMessage::model("Search, Evaluate, Execute.", fixed_now());
        assert_eq!(chat_line(&coach), "[22:13] Coach Alex: Search, Evaluate, Execute.");
    }
}
