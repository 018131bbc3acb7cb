use academy_core::remediation::{CardFace, ReviewCard};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewCardVm {
    pub heading: String,
    pub category: String,
    pub text: String,
    pub is_last: bool,
}

impl From<ReviewCard<'_>> for ReviewCardVm {
    fn from(card: ReviewCard<'_>) -> Self {
        let side = match card.face {
            CardFace::Front => "Question",
            CardFace::Back => "Answer",
        };
        Self {
            heading: format!("Card {} of {} ({side})", card.position + 1, card.total),
            category: card.card.category.clone(),
            text: card.visible_text().to_string(),
            is_last: card.is_last(),
        }
    }
}
