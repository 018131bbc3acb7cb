//! Built-in content for offline play.

use academy_core::model::{
    DrivingScenario, Flashcard, FlashcardId, QuizQuestion, ScenarioId, ScenarioOption,
};

fn question(text: &str, options: [&str; 4], correct_index: usize, explanation: &str) -> QuizQuestion {
    QuizQuestion {
        question: text.into(),
        options: options.into_iter().map(String::from).collect(),
        correct_index,
        explanation: explanation.into(),
    }
}

pub(crate) fn quiz() -> Vec<QuizQuestion> {
    vec![
        question(
            "What does the S.E.E. strategy stand for?",
            ["Signal, Enter, Exit", "Search, Evaluate, Execute", "Stop, Examine, Engage", "Scan, Estimate, Evade"],
            1,
            "Ohio teaches Search, Evaluate, Execute as its core hazard-handling strategy.",
        ),
        question(
            "What is the legal BAC limit for Ohio drivers under 21?",
            ["0.00%", "0.02%", "0.05%", "0.08%"],
            1,
            "Drivers under 21 are over the limit at 0.02%; 0.08% applies to drivers 21 and older.",
        ),
        question(
            "How many behind-the-wheel hours must a driver under 21 complete?",
            ["4", "8", "24", "50"],
            1,
            "The mandate requires 24h classroom, 8h behind-the-wheel and 50h supervised practice.",
        ),
        question(
            "Which Smith System key helps you avoid being boxed in?",
            ["Aim High", "Keep Eyes Moving", "Leave Yourself an Out", "Get the Big Picture"],
            2,
            "Leaving yourself an out keeps an escape path open around your vehicle.",
        ),
        question(
            "What is the maximum online coursework allowed per day?",
            ["2 hours", "4 hours", "6 hours", "8 hours"],
            1,
            "Daily compliance caps online work at 4 hours.",
        ),
    ]
}

pub(crate) fn scenarios() -> Vec<DrivingScenario> {
    vec![
        DrivingScenario {
            id: ScenarioId::new("school-bus"),
            context: "You are driving on a two-lane road when a school bus ahead stops and \
                      extends its stop arm with red lights flashing."
                .into(),
            image_description: "Yellow school bus, red lights flashing, children on the curb".into(),
            options: vec![
                ScenarioOption {
                    text: "Stop at least 10 feet from the bus and wait".into(),
                    is_correct: true,
                    feedback: "Correct. Traffic in both directions stops on a two-lane road.".into(),
                },
                ScenarioOption {
                    text: "Pass slowly on the left".into(),
                    is_correct: false,
                    feedback: "Passing a stopped school bus is illegal and puts children at risk.".into(),
                },
                ScenarioOption {
                    text: "Honk so the children stay on the curb".into(),
                    is_correct: false,
                    feedback: "Honking can startle children into the road.".into(),
                },
            ],
        },
        DrivingScenario {
            id: ScenarioId::new("merge-i71"),
            context: "You are on the on-ramp to I-71 and traffic in the right lane is moving \
                      at 65 mph."
                .into(),
            image_description: "Highway on-ramp merging into busy right lane".into(),
            options: vec![
                ScenarioOption {
                    text: "Stop at the end of the ramp and wait for a gap".into(),
                    is_correct: false,
                    feedback: "Stopping on a ramp invites a rear-end collision.".into(),
                },
                ScenarioOption {
                    text: "Search for a gap, match speed, signal and merge".into(),
                    is_correct: true,
                    feedback: "Search, Evaluate, Execute: match speed and blend in.".into(),
                },
                ScenarioOption {
                    text: "Merge immediately and let traffic adjust".into(),
                    is_correct: false,
                    feedback: "Merging traffic must yield to vehicles already on the highway.".into(),
                },
            ],
        },
    ]
}

pub(crate) fn flashcard(topic: &str) -> Flashcard {
    Flashcard::new(
        FlashcardId::generate(),
        topic,
        "Re-read the explanation, then apply Search, Evaluate, Execute to the situation.",
        "Remediation",
    )
}

pub(crate) fn coach_reply(message: &str) -> String {
    format!(
        "Great question! For \"{}\", remember S.E.E.: Search the scene, Evaluate the risks, \
         Execute a safe move. You've got this!",
        message.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::validate_quiz;

    #[test]
    fn samples_are_valid_content() {
        assert!(validate_quiz(&quiz()).is_ok());
        for scenario in scenarios() {
            assert!(scenario.validate().is_ok());
            assert_eq!(scenario.options.iter().filter(|o| o.is_correct).count(), 1);
        }
        assert!(flashcard("Stop signs").validate().is_ok());
    }
}
