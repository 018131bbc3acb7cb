//! Scenario missions: one driving situation at a time, one choice each.

use std::sync::Arc;

use tracing::{debug, warn};

use academy_core::model::{DrivingScenario, ScenarioOption};
use academy_core::reward::{RewardOutcome, XpReward};

use crate::error::{ProviderError, ScenarioError};
use crate::generation::{GenerationCounter, LoadOutcome, LoadTicket};
use crate::learner::LearnerSession;
use crate::provider::ContentProvider;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScenarioState {
    #[default]
    Loading,
    Failed {
        reason: String,
    },
    Active {
        scenario: DrivingScenario,
        selection: Option<usize>,
    },
}

/// Result of committing a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOutcome {
    pub option: usize,
    pub is_correct: bool,
    pub feedback: String,
    /// Set only for the safe choice.
    pub reward: Option<XpReward>,
}

/// Scenario state machine.
///
/// `Loading → Active(None) → Active(Some(i))`, then `request_next` goes back
/// to `Loading` and the next scenario replaces the current one wholesale.
/// Wrong choices earn nothing and never queue a flashcard.
#[derive(Debug, Default)]
pub struct ScenarioSession {
    state: ScenarioState,
    generations: GenerationCounter,
}

impl ScenarioSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &ScenarioState {
        &self.state
    }

    #[must_use]
    pub fn scenario(&self) -> Option<&DrivingScenario> {
        match &self.state {
            ScenarioState::Active { scenario, .. } => Some(scenario),
            _ => None,
        }
    }

    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        match self.state {
            ScenarioState::Active { selection, .. } => selection,
            _ => None,
        }
    }

    /// Issue the first load, or retry after a failure.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotChosen` while an unanswered scenario is
    /// showing; use `request_next` once a choice is made.
    pub fn begin_load(&mut self) -> Result<LoadTicket, ScenarioError> {
        if let ScenarioState::Active { selection, .. } = self.state {
            return Err(if selection.is_some() {
                ScenarioError::AlreadyChosen
            } else {
                ScenarioError::NotChosen
            });
        }
        Ok(self.issue())
    }

    /// Move on to the next mission after a choice.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotChosen` before a choice is made.
    pub fn request_next(&mut self) -> Result<LoadTicket, ScenarioError> {
        match self.state {
            ScenarioState::Active {
                selection: Some(_), ..
            } => Ok(self.issue()),
            ScenarioState::Active { selection: None, .. } => Err(ScenarioError::NotChosen),
            ScenarioState::Loading => Err(ScenarioError::Loading),
            ScenarioState::Failed { .. } => Err(ScenarioError::NotActive),
        }
    }

    /// Apply a provider response for `ticket`; stale tickets are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::Provider` after moving to `Failed`.
    pub fn apply_loaded(
        &mut self,
        ticket: LoadTicket,
        response: Result<DrivingScenario, ProviderError>,
    ) -> Result<LoadOutcome, ScenarioError> {
        if !self.generations.is_current(ticket) || !matches!(self.state, ScenarioState::Loading) {
            warn!(
                stale = ?ticket.generation(),
                current = ?self.generations.current(),
                "discarding stale scenario response"
            );
            return Ok(LoadOutcome::Stale);
        }

        match response {
            Ok(scenario) => {
                debug!(scenario = %scenario.id, options = scenario.options.len(), "scenario applied");
                self.state = ScenarioState::Active {
                    scenario,
                    selection: None,
                };
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                warn!(error = %err, "scenario load failed");
                self.state = ScenarioState::Failed {
                    reason: err.to_string(),
                };
                Err(err.into())
            }
        }
    }

    /// Commit a choice. Only the first choice per scenario counts.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::AlreadyChosen`, `ScenarioError::OptionOutOfRange`,
    /// or `ScenarioError::Loading`/`ScenarioError::NotActive`; none change state.
    pub fn submit_choice(&mut self, option: usize) -> Result<ChoiceOutcome, ScenarioError> {
        let (scenario, selection) = match &mut self.state {
            ScenarioState::Active {
                scenario,
                selection,
            } => (scenario, selection),
            ScenarioState::Loading => return Err(ScenarioError::Loading),
            ScenarioState::Failed { .. } => return Err(ScenarioError::NotActive),
        };
        if selection.is_some() {
            return Err(ScenarioError::AlreadyChosen);
        }
        let chosen = scenario
            .option(option)
            .ok_or(ScenarioError::OptionOutOfRange {
                index: option,
                len: scenario.options.len(),
            })?;

        let outcome = ChoiceOutcome {
            option,
            is_correct: chosen.is_correct,
            feedback: chosen.feedback.clone(),
            reward: chosen.is_correct.then_some(XpReward::SCENARIO_CORRECT),
        };
        *selection = Some(option);
        debug!(option, correct = outcome.is_correct, "scenario choice committed");
        Ok(outcome)
    }

    fn issue(&mut self) -> LoadTicket {
        self.state = ScenarioState::Loading;
        let ticket = self.generations.issue();
        debug!(generation = ?ticket.generation(), "scenario load issued");
        ticket
    }
}

//
// ─── WORKFLOW ──────────────────────────────────────────────────────────────────
//

/// Choice outcome plus the ledger update it caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceReport {
    pub outcome: ChoiceOutcome,
    pub reward: Option<RewardOutcome>,
}

/// Orchestrates scenario loading and choices against a content provider.
#[derive(Clone)]
pub struct ScenarioLoopService {
    provider: Arc<dyn ContentProvider>,
}

impl ScenarioLoopService {
    #[must_use]
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self { provider }
    }

    /// Load the first scenario, or retry after a failure.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError` for a rejected transition or a provider failure.
    pub async fn start(&self, session: &mut ScenarioSession) -> Result<LoadOutcome, ScenarioError> {
        let ticket = session.begin_load()?;
        let response = self.provider.fetch_scenario().await;
        session.apply_loaded(ticket, response)
    }

    /// Replace an answered scenario with the next one.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotChosen` before a choice, or the provider failure.
    pub async fn next(&self, session: &mut ScenarioSession) -> Result<LoadOutcome, ScenarioError> {
        let ticket = session.request_next()?;
        let response = self.provider.fetch_scenario().await;
        session.apply_loaded(ticket, response)
    }

    /// Commit a choice and credit XP for the safe one.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError` when the choice is rejected.
    pub fn choose(
        &self,
        session: &mut ScenarioSession,
        learner: &mut LearnerSession,
        option: usize,
    ) -> Result<ChoiceReport, ScenarioError> {
        let outcome = session.submit_choice(option)?;
        let reward = outcome.reward.map(|reward| learner.apply_reward(reward));
        Ok(ChoiceReport { outcome, reward })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::ScenarioId;
    use academy_core::time::fixed_now;

    use crate::provider::InMemoryContentProvider;

    fn scenario(id: &str) -> DrivingScenario {
        DrivingScenario {
            id: ScenarioId::new(id),
            context: "Light turns yellow as you approach.".into(),
            image_description: "Intersection".into(),
            options: vec![
                ScenarioOption {
                    text: "Stop safely".into(),
                    is_correct: true,
                    feedback: "Good".into(),
                },
                ScenarioOption {
                    text: "Speed up".into(),
                    is_correct: false,
                    feedback: "Risky".into(),
                },
            ],
        }
    }

    fn active(id: &str) -> ScenarioSession {
        let mut session = ScenarioSession::new();
        let ticket = session.begin_load().unwrap();
        session.apply_loaded(ticket, Ok(scenario(id))).unwrap();
        session
    }

    #[test]
    fn second_choice_is_rejected_without_change() {
        let mut session = active("s1");
        let first = session.submit_choice(1).unwrap();
        assert!(!first.is_correct);
        assert_eq!(first.reward, None);

        let err = session.submit_choice(0).unwrap_err();
        assert!(matches!(err, ScenarioError::AlreadyChosen));
        assert_eq!(session.selection(), Some(1));
        assert!(!session.scenario().unwrap().options[1].is_correct);
    }

    #[test]
    fn correct_choice_carries_scenario_reward() {
        let mut session = active("s1");
        let outcome = session.submit_choice(0).unwrap();
        assert_eq!(outcome.reward, Some(XpReward::SCENARIO_CORRECT));
        assert_eq!(outcome.feedback, "Good");
    }

    #[test]
    fn next_requires_a_choice() {
        let mut session = active("s1");
        assert!(matches!(session.request_next().unwrap_err(), ScenarioError::NotChosen));
        session.submit_choice(0).unwrap();
        let ticket = session.request_next().unwrap();
        assert_eq!(session.state(), &ScenarioState::Loading);
        session.apply_loaded(ticket, Ok(scenario("s2"))).unwrap();
        assert_eq!(session.scenario().unwrap().id.as_str(), "s2");
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let mut session = active("s1");
        let err = session.submit_choice(7).unwrap_err();
        assert!(matches!(err, ScenarioError::OptionOutOfRange { index: 7, len: 2 }));
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn stale_scenario_is_discarded() {
        let mut session = ScenarioSession::new();
        let stale = session.begin_load().unwrap();
        let fresh = session.begin_load().unwrap();
        session.apply_loaded(fresh, Ok(scenario("fresh"))).unwrap();
        assert_eq!(
            session.apply_loaded(stale, Ok(scenario("late"))).unwrap(),
            LoadOutcome::Stale
        );
        assert_eq!(session.scenario().unwrap().id.as_str(), "fresh");
    }

    #[test]
    fn failed_load_can_be_retried() {
        let mut session = ScenarioSession::new();
        let ticket = session.begin_load().unwrap();
        assert!(session.apply_loaded(ticket, Err(ProviderError::Disabled)).is_err());
        assert!(matches!(session.state(), ScenarioState::Failed { .. }));
        assert!(matches!(session.submit_choice(0).unwrap_err(), ScenarioError::NotActive));

        let retry = session.begin_load().unwrap();
        session.apply_loaded(retry, Ok(scenario("s1"))).unwrap();
        assert!(session.scenario().is_some());
    }

    #[tokio::test]
    async fn loop_service_credits_only_safe_choices() {
        let provider = Arc::new(InMemoryContentProvider::new());
        provider.push_scenario(scenario("a"));
        provider.push_scenario(scenario("b"));
        let service = ScenarioLoopService::new(provider);
        let mut session = ScenarioSession::new();
        let mut learner = LearnerSession::new(fixed_now());

        service.start(&mut session).await.unwrap();
        let wrong = service.choose(&mut session, &mut learner, 1).unwrap();
        assert_eq!(wrong.reward, None);
        assert_eq!(learner.stats().xp(), 250);
        assert!(learner.remediation().is_empty());

        service.next(&mut session).await.unwrap();
        let right = service.choose(&mut session, &mut learner, 0).unwrap();
        assert_eq!(right.reward.unwrap().new_xp, 500);

        assert!(service.choose(&mut session, &mut learner, 0).is_err());
        assert_eq!(learner.stats().xp(), 500);
    }
}
