//! Prompt text sent to the completion service.

/// Grounding material every generation request cites.
pub(crate) const RESEARCH_REPORT: &str = "\
Comprehensive Research Report: Ohio Mandatory Class D Online Driver Training
- Class D: Standard operator license for personal vehicles.
- NEW MANDATE (Sept 30, 2025): Anyone under 21 (ages 16-20) MUST complete full 24h classroom + 8h behind-the-wheel + 50h supervised practice.
- S.E.E. Method: Search, Evaluate, Execute (Core Ohio Strategy).
- Smith System: Aim High, Get Big Picture, Keep Eyes Moving, Leave Yourself an Out, Make Sure They See You.
- Daily Compliance: Max 4 hours online work per day.
- Security: PVQs (Personal Validation Questions) are random.
- OVI Limits: 0.08% for 21+, 0.02% for under 21. Implied consent is law.";

pub(crate) fn quiz_prompt(size: usize) -> String {
    format!(
        "Generate {size} unique multiple-choice questions for an Ohio driving theory test. \
Focus on the S.E.E. strategy and OVI laws based on:\n{RESEARCH_REPORT}\n\n\
Respond with JSON only: {{\"questions\": [{{\"question\": string, \
\"options\": [4 strings], \"correctIndex\": 0-based integer, \
\"explanation\": string explaining why the answer is correct}}]}}"
    )
}

pub(crate) fn scenario_prompt() -> String {
    format!(
        "Create a \"Search, Evaluate, Execute\" (S.E.E.) driving scenario in Ohio. \
Describe a situation (e.g., merging on I-71, school bus stopping). Provide 3 options for action.\n\
Context:\n{RESEARCH_REPORT}\n\n\
Respond with JSON only: {{\"id\": string, \"context\": detailed description of the road situation, \
\"imageDescription\": what the visual simulation should look like, \
\"options\": [{{\"text\": string, \"isCorrect\": boolean, \"feedback\": string}}]}}"
    )
}

pub(crate) fn flashcard_prompt(topic: &str) -> String {
    format!(
        "The student missed a question about \"{topic}\". Generate a remedial flashcard with a \
'Front' (Concept) and 'Back' (Key takeaway/Law).\n\n\
Respond with JSON only: {{\"id\": string, \"front\": string, \"back\": string, \"category\": string}}"
    )
}

pub(crate) fn coach_instruction() -> String {
    format!(
        "You are 'Coach Alex', the mascot for DriveReady Academy. \
Help the student with driving theory. Focus on Ohio laws and the S.E.E. strategy. \
Reference this report:\n{RESEARCH_REPORT}\n\
Keep it high-energy, encouraging, and informative!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_prompt_names_size_and_report() {
        let prompt = quiz_prompt(7);
        assert!(prompt.contains("Generate 7 unique"));
        assert!(prompt.contains("OVI Limits"));
        assert!(prompt.contains("\"correctIndex\""));
    }

    #[test]
    fn flashcard_prompt_quotes_topic() {
        assert!(flashcard_prompt("School bus stops").contains("about \"School bus stops\""));
    }
}
