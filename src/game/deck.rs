use super::membership::Party;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::iter::repeat;

pub const LIBERAL_POLICIES: usize = 7;
pub const FASCIST_POLICIES: usize = 11;

/// The policy draw pile and its discard pile. The top of the deck is the end of `deck`.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Deck {
    deck: Vec<Party>,
    discard: Vec<Party>,
}

impl Deck {
    /// Creates the full, shuffled policy deck.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut deck = Vec::with_capacity(LIBERAL_POLICIES + FASCIST_POLICIES);
        deck.extend(repeat(Party::Fascist).take(FASCIST_POLICIES));
        deck.extend(repeat(Party::Liberal).take(LIBERAL_POLICIES));
        deck.shuffle(rng);
        Self { deck, discard: vec![] }
    }

    /// Shuffles the discard pile into the deck, if there are fewer than three cards in the draw deck.
    /// Returns `true` if a reshuffle happened.
    pub fn check_shuffle(&mut self, rng: &mut impl Rng) -> bool {
        if self.deck.len() >= 3 {
            return false;
        }
        self.deck.append(&mut self.discard);
        self.deck.shuffle(rng);
        true
    }

    /// Draws the top card from the deck.
    pub fn draw_one(&mut self) -> Option<Party> {
        self.deck.pop()
    }

    /// Draws the top three cards from the deck, top card first.
    pub fn draw_three(&mut self) -> Vec<Party> {
        let split = self.deck.len().saturating_sub(3);
        let mut cards = self.deck.split_off(split);
        cards.reverse();
        cards
    }

    /// Peeks at the top three cards in the draw pile, top card first.
    pub fn peek_three(&self) -> Vec<Party> {
        self.deck.iter().rev().take(3).copied().collect()
    }

    /// Places a card on the discard pile.
    pub fn discard(&mut self, card: Party) {
        self.discard.push(card);
    }

    /// The number of cards in the draw pile.
    pub fn count(&self) -> usize {
        self.deck.len()
    }

    /// The number of cards in the discard pile.
    pub fn discard_count(&self) -> usize {
        self.discard.len()
    }
}

#[cfg(test)]
impl Deck {
    /// Moves cards within the draw pile so the given cards are on top, first card topmost.
    pub fn arrange_top(&mut self, top_first: &[Party]) {
        let len = self.deck.len();
        for (i, card) in top_first.iter().enumerate() {
            let slot = len - 1 - i;
            if let Some(pos) = self.deck[..=slot].iter().position(|c| c == card) {
                self.deck.swap(pos, slot);
            }
        }
    }
}
