use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::logger::ActionRecord;
use crate::player::{Chips, Seat};
use crate::pot::HandResult;

/// Progress of a hand. Betting happens from `Preflop` through `River`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Round {
    /// No hand started yet
    Waiting,
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Remaining hands are being compared
    Showdown,
    /// Pot settled
    Ended,
}

impl Round {
    pub fn is_betting(self) -> bool {
        matches!(self, Round::Preflop | Round::Flop | Round::Turn | Round::River)
    }
}

/// Forced bets posted at the start of each hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Blinds {
    pub small: Chips,
    pub big: Chips,
    /// Lets an unraised big blind act again before the flop.
    #[serde(default)]
    pub big_blind_option: bool,
}

impl Blinds {
    pub fn new(small: Chips, big: Chips) -> Self {
        Self {
            small,
            big,
            big_blind_option: false,
        }
    }

    pub fn with_big_blind_option(mut self, enabled: bool) -> Self {
        self.big_blind_option = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.big == 0 {
            return Err(GameError::InvalidConfig("big blind must be > 0".into()));
        }
        if self.small > self.big {
            return Err(GameError::InvalidConfig(format!(
                "small blind {} exceeds big blind {}",
                self.small, self.big
            )));
        }
        Ok(())
    }
}

/// Complete, serializable state of one hand.
///
/// Produced by [`crate::engine::start_hand`] and replaced wholesale by every
/// [`crate::engine::apply_action`]; callers only read it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandState {
    pub(crate) hand_id: u64,
    pub(crate) round: Round,
    pub(crate) seats: Vec<Seat>,
    /// Chips collected from completed betting rounds
    pub(crate) pot: Chips,
    pub(crate) current_bet: Chips,
    pub(crate) current_actor: Option<usize>,
    pub(crate) dealer_index: usize,
    pub(crate) small_blind_index: usize,
    pub(crate) big_blind_index: usize,
    pub(crate) community: Vec<Card>,
    pub(crate) deck: Deck,
    pub(crate) blinds: Blinds,
    /// Seats that still owe an action this round
    pub(crate) pending: Vec<usize>,
    pub(crate) history: Vec<ActionRecord>,
    pub(crate) result: Option<HandResult>,
}

impl HandState {
    pub fn hand_id(&self) -> u64 {
        self.hand_id
    }
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn seat(&self, index: usize) -> Option<&Seat> {
        self.seats.get(index)
    }
    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn current_actor(&self) -> Option<usize> {
        self.current_actor
    }
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }
    pub fn small_blind_index(&self) -> usize {
        self.small_blind_index
    }
    pub fn big_blind_index(&self) -> usize {
        self.big_blind_index
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }
    pub fn deck(&self) -> &Deck {
        &self.deck
    }
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }
    pub fn result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }

    /// Pot plus every bet still in front of the seats.
    pub fn total_pot(&self) -> Chips {
        self.pot + self.seats.iter().map(Seat::current_bet).sum::<Chips>()
    }

    /// Stacks, round bets and pot together; constant for the whole hand.
    pub fn total_chips(&self) -> Chips {
        self.seats.iter().map(Seat::stack).sum::<Chips>() + self.total_pot()
    }

    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_active()).count()
    }

    pub fn in_hand_count(&self) -> usize {
        self.seats.iter().filter(|s| s.in_hand()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.round == Round::Ended
    }

    /// First seat after `from`, wrapping, that satisfies `pred`.
    pub(crate) fn next_seat(&self, from: usize, pred: impl Fn(usize, &Seat) -> bool) -> Option<usize> {
        next_index(self.seats.len(), from, |i| pred(i, &self.seats[i]))
    }

    /// Active seats in acting order, starting after `from`.
    pub(crate) fn active_after(&self, from: usize) -> Vec<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .filter(|&i| self.seats[i].is_active())
            .collect()
    }

    /// Moves every round bet into the pot.
    pub(crate) fn collect_bets(&mut self) {
        for seat in &mut self.seats {
            self.pot += seat.take_round_bet();
        }
        self.current_bet = 0;
    }
}

pub(crate) fn next_index(n: usize, from: usize, pred: impl Fn(usize) -> bool) -> Option<usize> {
    if n == 0 {
        return None;
    }
    (1..=n).map(|step| (from + step) % n).find(|&i| pred(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_index_wraps_and_includes_start_last() {
        assert_eq!(next_index(4, 2, |i| i == 0), Some(0));
        assert_eq!(next_index(4, 2, |i| i == 2), Some(2));
        assert_eq!(next_index(4, 2, |_| false), None);
        assert_eq!(next_index(0, 0, |_| true), None);
    }

    #[test]
    fn blinds_validation() {
        assert!(Blinds::new(5, 10).validate().is_ok());
        assert!(Blinds::new(10, 5).validate().is_err());
        assert!(Blinds::new(0, 0).validate().is_err());
    }

    #[test]
    fn big_blind_option_defaults_off_when_deserialized() {
        let b: Blinds = serde_json::from_str(r#"{"small":1,"big":2}"#).unwrap();
        assert!(!b.big_blind_option);
    }
}
