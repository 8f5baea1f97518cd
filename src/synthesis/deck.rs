//! Flashcard review session: a deck plus a cursor.
//!
//! Every operation on an empty deck is a no-op reported as `None`/`false`.
//! Navigation clamps at both ends, there is no wraparound.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::study_data::Flashcard;

/// How long the front end should wait before moving on after "known".
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownOutcome {
    /// Present when there is a next card to move to.
    pub auto_advance_after: Option<Duration>,
    pub deck_complete: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
    cursor: usize,
    #[serde(skip)]
    flipped: bool,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            cursor: 0,
            flipped: false,
        }
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.cards.is_empty()).then_some(self.cursor)
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.cursor)
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn toggle_flip(&mut self) -> bool {
        if self.cards.is_empty() {
            return false;
        }
        self.flipped = !self.flipped;
        self.flipped
    }

    /// Returns true when the cursor moved.
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.cards.len() {
            self.cursor += 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    pub fn retreat(&mut self) -> bool {
        if self.cursor > 0 && !self.cards.is_empty() {
            self.cursor -= 1;
            self.flipped = false;
            true
        } else {
            false
        }
    }

    /// Marks the current card as mastered. The caller performs the advance
    /// after `auto_advance_after` elapses.
    pub fn mark_known(&mut self) -> Option<KnownOutcome> {
        let card = self.cards.get_mut(self.cursor)?;
        card.mastered = true;
        let has_next = self.cursor + 1 < self.cards.len();
        Some(KnownOutcome {
            auto_advance_after: has_next.then_some(AUTO_ADVANCE_DELAY),
            deck_complete: self.all_mastered(),
        })
    }

    pub fn mark_unknown(&mut self) -> Option<()> {
        let card = self.cards.get_mut(self.cursor)?;
        card.mastered = false;
        Some(())
    }

    pub fn all_mastered(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.mastered)
    }

    pub fn mastered_count(&self) -> usize {
        self.cards.iter().filter(|c| c.mastered).count()
    }

    /// Percentage of mastered cards, rounded; 0 for an empty deck.
    pub fn retention_rate(&self) -> u32 {
        if self.cards.is_empty() {
            return 0;
        }
        (self.mastered_count() as f64 / self.cards.len() as f64 * 100.0).round() as u32
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.cursor = 0;
        self.flipped = false;
    }
}
