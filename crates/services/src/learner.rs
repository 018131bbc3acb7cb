use chrono::{DateTime, Utc};
use tracing::{debug, info};

use academy_core::model::{Flashcard, UserStats};
use academy_core::remediation::RemediationQueue;
use academy_core::reward::{RewardOutcome, XpReward};

/// Top-level area of the learner's dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Booking,
}

/// Per-learner state shared by every activity in one sitting.
///
/// Quiz, scenario and review flows receive this by `&mut` and change it only
/// through the named operations below. Nothing here outlives the process.
#[derive(Debug, Clone)]
pub struct LearnerSession {
    stats: UserStats,
    remediation: RemediationQueue,
    active_view: ActiveView,
    started_at: DateTime<Utc>,
}

impl LearnerSession {
    /// Start a sitting with the seed stats and an empty remediation queue.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self::with_stats(UserStats::seed(), started_at)
    }

    #[must_use]
    pub fn with_stats(stats: UserStats, started_at: DateTime<Utc>) -> Self {
        Self {
            stats,
            remediation: RemediationQueue::new(),
            active_view: ActiveView::Dashboard,
            started_at,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    #[must_use]
    pub fn remediation(&self) -> &RemediationQueue {
        &self.remediation
    }

    /// Review controls (start, flip, advance, cancel) go through here.
    pub fn remediation_mut(&mut self) -> &mut RemediationQueue {
        &mut self.remediation
    }

    #[must_use]
    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn apply_reward(&mut self, reward: XpReward) -> RewardOutcome {
        let previous_xp = self.stats.xp();
        let outcome = self.stats.apply_reward(reward);
        if outcome.leveled_up_from(previous_xp) {
            info!(level = outcome.new_level, xp = outcome.new_xp, "learner leveled up");
        } else {
            debug!(xp = outcome.new_xp, points = reward.points(), "reward applied");
        }
        outcome
    }

    /// Queue a remediation card. Returns the new queue length.
    pub fn append_flashcard(&mut self, card: Flashcard) -> usize {
        debug!(card = %card.id, "remediation card queued");
        self.remediation.append(card);
        self.remediation.len()
    }

    pub fn set_active_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    /// True when the queue has grown enough to open review unprompted.
    #[must_use]
    pub fn should_auto_open_review(&self) -> bool {
        self.remediation.should_auto_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::FlashcardId;
    use academy_core::time::fixed_now;

    fn card(id: &str) -> Flashcard {
        Flashcard::new(FlashcardId::new(id), "front", "back", "Theory")
    }

    #[test]
    fn new_session_uses_seed_stats() {
        let learner = LearnerSession::new(fixed_now());
        assert_eq!(learner.stats().xp(), 250);
        assert_eq!(learner.stats().level(), 1);
        assert_eq!(learner.active_view(), ActiveView::Dashboard);
        assert!(learner.remediation().is_empty());
        assert_eq!(learner.started_at(), fixed_now());
    }

    #[test]
    fn rewards_accumulate() {
        let mut learner = LearnerSession::new(fixed_now());
        learner.apply_reward(XpReward::SCENARIO_CORRECT);
        let outcome = learner.apply_reward(XpReward::SCENARIO_CORRECT);
        assert_eq!(outcome.new_xp, 750);
        assert_eq!(learner.stats().xp(), 750);
    }

    #[test]
    fn third_card_triggers_auto_review() {
        let mut learner = LearnerSession::new(fixed_now());
        assert_eq!(learner.append_flashcard(card("a")), 1);
        assert_eq!(learner.append_flashcard(card("b")), 2);
        assert!(!learner.should_auto_open_review());
        assert_eq!(learner.append_flashcard(card("c")), 3);
        assert!(learner.should_auto_open_review());
    }

    #[test]
    fn active_view_switches() {
        let mut learner = LearnerSession::new(fixed_now());
        learner.set_active_view(ActiveView::Booking);
        assert_eq!(learner.active_view(), ActiveView::Booking);
    }
}
