use crate::model::ids::BadgeId;

/// An achievement shown on the learner's stats bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
}

impl Badge {
    const fn catalog_entry(
        id: BadgeId,
        name: &'static str,
        icon: &'static str,
        description: &'static str,
        unlocked: bool,
    ) -> Self {
        Self {
            id,
            name,
            icon,
            description,
            unlocked,
        }
    }
}

/// The badge catalog every learner session starts with.
///
/// Only the starter badge is unlocked; no rule unlocks the others yet.
#[must_use]
pub fn default_badges() -> Vec<Badge> {
    vec![
        Badge::catalog_entry(
            BadgeId::ROOKIE,
            "Safe Starter",
            "🔰",
            "First login to the academy!",
            true,
        ),
        Badge::catalog_entry(
            BadgeId::SIGN_MASTER,
            "Sign Expert",
            "🛑",
            "Identify 5 signs correctly.",
            false,
        ),
        Badge::catalog_entry(
            BadgeId::THEORY_PRO,
            "Theory Elite",
            "🧠",
            "Score 100% on a mastery checkpoint.",
            false,
        ),
        Badge::catalog_entry(
            BadgeId::NIGHT_OWL,
            "Visibility Pro",
            "🌙",
            "Study low-visibility laws.",
            false,
        ),
    ]
}
