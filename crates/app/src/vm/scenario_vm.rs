use services::ScenarioSession;
use services::scenario::ChoiceReport;

use super::quiz_vm::option_letter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioVm {
    pub context: String,
    pub scene: String,
    pub options: Vec<String>,
}

impl ScenarioVm {
    #[must_use]
    pub fn from_session(session: &ScenarioSession) -> Option<Self> {
        let scenario = session.scenario()?;
        Some(Self {
            context: scenario.context.clone(),
            scene: format!("[{}]", scenario.image_description),
            options: scenario
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| format!("  {}) {}", option_letter(i), option.text))
                .collect(),
        })
    }
}

#[must_use]
pub fn choice_feedback(report: &ChoiceReport) -> Vec<String> {
    let verdict = match report.outcome.reward {
        Some(reward) => format!("Safe choice! +{} XP", reward.points()),
        None => "Unsafe choice.".to_string(),
    };
    vec![verdict, report.outcome.feedback.clone()]
}
