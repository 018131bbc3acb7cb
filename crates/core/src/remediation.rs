//! Remediation queue: flashcards collected from wrong answers and the review pass over them.

use thiserror::Error;

use crate::model::Flashcard;

/// Review can be started as soon as one card is queued.
pub const REVIEW_AVAILABLE_AT: usize = 1;
/// The shell opens review on its own once this many cards pile up.
pub const REVIEW_AUTO_OPEN_AT: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("no remediation cards queued")]
    Empty,
    #[error("review is not in progress")]
    NotReviewing,
    #[error("review is already in progress")]
    AlreadyReviewing,
}

/// Which side of the current card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFace {
    #[default]
    Front,
    Back,
}

impl CardFace {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            CardFace::Front => CardFace::Back,
            CardFace::Back => CardFace::Front,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReviewCursor {
    index: usize,
    face: CardFace,
}

/// The card currently under review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewCard<'a> {
    pub card: &'a Flashcard,
    pub face: CardFace,
    /// Zero-based position in the queue.
    pub position: usize,
    pub total: usize,
}

impl ReviewCard<'_> {
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.total
    }

    /// Text on the visible face.
    #[must_use]
    pub fn visible_text(&self) -> &str {
        match self.face {
            CardFace::Front => &self.card.front,
            CardFace::Back => &self.card.back,
        }
    }
}

/// What `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStep {
    /// Moved to the card at this position.
    Next { position: usize },
    /// The last card was passed; the queue has been emptied.
    Finished { reviewed: usize },
}

/// Ordered, duplicate-tolerant queue of remediation flashcards.
///
/// Cards are appended at the tail and reviewed strictly in insertion order.
/// Review is all-or-nothing: finishing or cancelling it empties the queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemediationQueue {
    cards: Vec<Flashcard>,
    review: Option<ReviewCursor>,
}

impl RemediationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn append(&mut self, card: Flashcard) {
        self.cards.push(card);
    }

    #[must_use]
    pub fn review_available(&self) -> bool {
        self.cards.len() >= REVIEW_AVAILABLE_AT
    }

    /// True when enough cards piled up that review should open unprompted.
    #[must_use]
    pub fn should_auto_open(&self) -> bool {
        !self.is_reviewing() && self.cards.len() >= REVIEW_AUTO_OPEN_AT
    }

    #[must_use]
    pub fn is_reviewing(&self) -> bool {
        self.review.is_some()
    }

    /// Begin reviewing from the first queued card, front face up.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Empty` with nothing queued, or
    /// `ReviewError::AlreadyReviewing` if a review is open.
    pub fn start_review(&mut self) -> Result<ReviewCard<'_>, ReviewError> {
        if self.is_reviewing() {
            return Err(ReviewError::AlreadyReviewing);
        }
        if !self.review_available() {
            return Err(ReviewError::Empty);
        }
        self.review = Some(ReviewCursor {
            index: 0,
            face: CardFace::Front,
        });
        self.current().ok_or(ReviewError::Empty)
    }

    #[must_use]
    pub fn current(&self) -> Option<ReviewCard<'_>> {
        let cursor = self.review?;
        let card = self.cards.get(cursor.index)?;
        Some(ReviewCard {
            card,
            face: cursor.face,
            position: cursor.index,
            total: self.cards.len(),
        })
    }

    /// Turn the current card over.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::NotReviewing` outside a review.
    pub fn flip(&mut self) -> Result<CardFace, ReviewError> {
        let cursor = self.review.as_mut().ok_or(ReviewError::NotReviewing)?;
        cursor.face = cursor.face.flipped();
        Ok(cursor.face)
    }

    /// Move to the next card, or finish the review after the last one.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::NotReviewing` outside a review.
    pub fn advance(&mut self) -> Result<ReviewStep, ReviewError> {
        let cursor = self.review.as_mut().ok_or(ReviewError::NotReviewing)?;
        let next = cursor.index + 1;
        if next < self.cards.len() {
            cursor.index = next;
            cursor.face = CardFace::Front;
            return Ok(ReviewStep::Next { position: next });
        }
        Ok(ReviewStep::Finished {
            reviewed: self.close_review(),
        })
    }

    /// Abandon the review. The queue is emptied all the same.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::NotReviewing` outside a review.
    pub fn cancel(&mut self) -> Result<usize, ReviewError> {
        if !self.is_reviewing() {
            return Err(ReviewError::NotReviewing);
        }
        Ok(self.close_review())
    }

    fn close_review(&mut self) -> usize {
        self.review = None;
        let cleared = self.cards.len();
        self.cards.clear();
        cleared
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
