//! Reward ledger: cumulative XP and the level derived from it.

//
// ─── CONSTANTS ─────────────────────────────────────────────────────────────────
//

/// XP needed to climb one level.
pub const XP_PER_LEVEL: u64 = 1000;

//
// ─── REWARD ────────────────────────────────────────────────────────────────────
//

/// A strictly positive XP award.
///
/// # Examples
///
/// ```
/// # use academy_core::reward::XpReward;
/// assert!(XpReward::new(0).is_none());
/// assert_eq!(XpReward::new(40).map(XpReward::points), Some(40));
/// assert_eq!(XpReward::SCENARIO_CORRECT.points(), 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct XpReward(u32);

impl XpReward {
    /// Awarded for a correct theory quiz answer.
    pub const QUIZ_CORRECT: Self = Self(100);
    /// Awarded for choosing the safe action in a driving scenario.
    pub const SCENARIO_CORRECT: Self = Self(250);

    #[must_use]
    pub fn new(points: u32) -> Option<Self> {
        (points > 0).then_some(Self(points))
    }

    #[must_use]
    pub fn points(self) -> u32 {
        self.0
    }
}

/// Result of crediting a reward to a running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardOutcome {
    pub new_xp: u64,
    pub new_level: u64,
}

impl RewardOutcome {
    /// True when the reward pushed the learner past a level boundary.
    #[must_use]
    pub fn leveled_up_from(&self, previous_xp: u64) -> bool {
        self.new_level > level_for_xp(previous_xp)
    }
}

//
// ─── LEDGER ────────────────────────────────────────────────────────────────────
//

/// Level for a cumulative XP total: `floor(xp / 1000) + 1`.
#[must_use]
pub fn level_for_xp(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}

/// Credit `reward` to `current_xp`.
///
/// # Examples
///
/// ```
/// # use academy_core::reward::{XpReward, apply_reward};
/// let outcome = apply_reward(950, XpReward::QUIZ_CORRECT);
/// assert_eq!(outcome.new_xp, 1050);
/// assert_eq!(outcome.new_level, 2);
/// ```
#[must_use]
pub fn apply_reward(current_xp: u64, reward: XpReward) -> RewardOutcome {
    let new_xp = current_xp.saturating_add(u64::from(reward.points()));
    RewardOutcome {
        new_xp,
        new_level: level_for_xp(new_xp),
    }
}

//
// ─── LEVEL PROGRESS ────────────────────────────────────────────────────────────
//

/// Progress-bar numbers for the stats header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    /// Fill of the bar within the current level, 0.0..100.0.
    pub percent: f64,
    /// Round-thousand label shown next to the XP total.
    pub milestone: u64,
}

impl LevelProgress {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn for_xp(xp: u64) -> Self {
        Self {
            percent: (xp % XP_PER_LEVEL) as f64 / 10.0,
            milestone: xp.div_ceil(XP_PER_LEVEL).saturating_mul(XP_PER_LEVEL),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
