use academy_core::model::{Badge, UserStats};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeVm {
    pub label: String,
    pub unlocked: bool,
}

impl BadgeVm {
    fn label_with_state(&self) -> String {
        if self.unlocked {
            self.label.clone()
        } else {
            format!("{} (locked)", self.label)
        }
    }
}

impl From<&Badge> for BadgeVm {
    fn from(badge: &Badge) -> Self {
        Self {
            label: format!("{} {}", badge.icon, badge.name),
            unlocked: badge.unlocked,
        }
    }
}

/// Header numbers: level, XP against the next milestone, streak, badges.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsVm {
    pub level: u64,
    pub xp: u64,
    pub milestone: u64,
    pub percent: f64,
    pub streak: u32,
    pub badges: Vec<BadgeVm>,
}

impl From<&UserStats> for StatsVm {
    fn from(stats: &UserStats) -> Self {
        let progress = stats.level_progress();
        Self {
            level: stats.level(),
            xp: stats.xp(),
            milestone: progress.milestone,
            percent: progress.percent,
            streak: stats.streak(),
            badges: stats.badges().iter().map(BadgeVm::from).collect(),
        }
    }
}

impl StatsVm {
    const BAR_WIDTH: usize = 20;

    #[must_use]
    pub fn headline(&self) -> String {
        format!(
            "Level {} | {} / {} XP | {}-day streak",
            self.level, self.xp, self.milestone, self.streak
        )
    }

    /// Text progress bar, e.g. `[#####---------------] 25%`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn progress_bar(&self) -> String {
        let filled = ((self.percent / 100.0) * Self::BAR_WIDTH as f64).floor() as usize;
        let filled = filled.min(Self::BAR_WIDTH);
        format!(
            "[{}{}] {:.0}%",
            "#".repeat(filled),
            "-".repeat(Self::BAR_WIDTH - filled),
            self.percent
        )
    }

    /// Every catalog badge, locked ones marked as such.
    #[must_use]
    pub fn badge_line(&self) -> String {
        let badges: Vec<String> = self.badges.iter().map(BadgeVm::label_with_state).collect();
        format!("Badges: {}", badges.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_stats_render_header() {
        let vm = StatsVm::from(&UserStats::seed());
        assert_eq!(vm.headline(), "Level 1 | 250 / 1000 XP | 3-day streak");
        assert_eq!(vm.progress_bar(), "[#####---------------] 25%");
        assert_eq!(vm.badges.len(), 4);
        let badges = vm.badge_line();
        assert!(badges.starts_with("Badges: 🔰 Safe Starter | 🛑 Sign Expert (locked)"));
        assert_eq!(badges.matches("(locked)").count(), 3);
    }
}
