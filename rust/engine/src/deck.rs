use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// The 52 cards of one hand, dealt strictly from the front.
///
/// `remaining() + dealt()` is always 52.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Unshuffled deck in suit-major order.
    pub fn ordered() -> Self {
        Self {
            cards: full_deck(),
            position: 0,
        }
    }

    pub fn new_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::ordered();
        deck.cards.shuffle(rng);
        deck
    }

    /// Deck whose first cards are `top`, followed by every other card in
    /// suit-major order.
    pub fn stacked(top: &[Card]) -> Result<Self, GameError> {
        let mut cards: Vec<Card> = Vec::with_capacity(52);
        for &c in top {
            if cards.contains(&c) {
                return Err(GameError::DuplicateCard(c));
            }
            cards.push(c);
        }
        cards.extend(full_deck().into_iter().filter(|c| !top.contains(c)));
        Ok(Self { cards, position: 0 })
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn deal(&mut self) -> Result<Card, GameError> {
        self.deal_card().ok_or(GameError::DeckExhausted)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn dealt(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn stacked_deck_puts_given_cards_on_top() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        let two = Card::new(Rank::Two, Suit::Hearts);
        let mut deck = Deck::stacked(&[ace, two]).unwrap();
        assert_eq!(deck.remaining(), 52);
        assert_eq!(deck.deal_card(), Some(ace));
        assert_eq!(deck.deal_card(), Some(two));
        assert_eq!(deck.remaining() + deck.dealt(), 52);
    }

    #[test]
    fn stacked_deck_rejects_duplicates() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(
            Deck::stacked(&[ace, ace]).unwrap_err(),
            GameError::DuplicateCard(ace)
        );
    }

    #[test]
    fn exhausted_deck_reports_error() {
        let mut deck = Deck::ordered();
        for _ in 0..52 {
            deck.deal().unwrap();
        }
        assert_eq!(deck.deal(), Err(GameError::DeckExhausted));
    }
}
