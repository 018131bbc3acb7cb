use crate::model::badge::{Badge, default_badges};
use crate::reward::{LevelProgress, RewardOutcome, XpReward, apply_reward, level_for_xp};

/// XP a fresh learner session starts with.
pub const SEED_XP: u64 = 250;
/// Streak (in days) a fresh learner session starts with.
pub const SEED_STREAK: u32 = 3;

/// Experience, level and badges for the current learner.
///
/// Level is always derived from XP, and XP only moves through
/// [`UserStats::apply_reward`], so it never decreases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    xp: u64,
    streak: u32,
    badges: Vec<Badge>,
}

impl UserStats {
    #[must_use]
    pub fn new(xp: u64, streak: u32, badges: Vec<Badge>) -> Self {
        Self { xp, streak, badges }
    }

    /// Stats a learner starts a session with.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(SEED_XP, SEED_STREAK, default_badges())
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[must_use]
    pub fn level(&self) -> u64 {
        level_for_xp(self.xp)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    #[must_use]
    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::for_xp(self.xp)
    }

    pub fn apply_reward(&mut self, reward: XpReward) -> RewardOutcome {
        let outcome = apply_reward(self.xp, reward);
        self.xp = outcome.new_xp;
        outcome
    }
}

impl Default for UserStats {
    fn default() -> Self {
        Self::seed()
    }
}
