use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// Chip amounts, in the table's smallest unit.
pub type Chips = u64;

/// Per-hand participation state of a seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Still in the hand and able to act
    Active,
    /// Gave up the hand
    Folded,
    /// In the hand with no chips left to bet
    AllIn,
    /// Dealt out of the hand (e.g. no chips)
    SittingOut,
}

/// Why chips last left a seat's stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum BetType {
    SmallBlind,
    BigBlind,
    Call,
    Raise,
    AllIn,
}

/// Represents a player action during a betting round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Fold and forfeit the hand
    Fold,
    /// Check (only valid when already matching the bet)
    Check,
    /// Call the current bet
    Call,
    /// Raise the table bet to the given total for this round
    Raise(Chips),
    /// Bet all remaining chips
    AllIn,
}

/// A player as supplied by the seating layer when a hand starts.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatedPlayer {
    pub id: String,
    pub stack: Chips,
}

impl SeatedPlayer {
    pub fn new(id: impl Into<String>, stack: Chips) -> Self {
        Self {
            id: id.into(),
            stack,
        }
    }
}

/// One seat's view of the hand in progress.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    player_id: String,
    position: usize,
    stack: Chips,
    /// Committed during the current betting round
    current_bet: Chips,
    /// Committed during the whole hand
    total_committed: Chips,
    state: PlayerState,
    hole: Vec<Card>,
    last_bet: Option<BetType>,
    pub(crate) is_dealer: bool,
    pub(crate) is_small_blind: bool,
    pub(crate) is_big_blind: bool,
}

impl Seat {
    pub fn new(player: &SeatedPlayer, position: usize) -> Self {
        let state = if player.stack == 0 {
            PlayerState::SittingOut
        } else {
            PlayerState::Active
        };
        Self {
            player_id: player.id.clone(),
            position,
            stack: player.stack,
            current_bet: 0,
            total_committed: 0,
            state,
            hole: Vec::with_capacity(2),
            last_bet: None,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }
    pub fn total_committed(&self) -> Chips {
        self.total_committed
    }
    pub fn state(&self) -> PlayerState {
        self.state
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }
    pub fn last_bet(&self) -> Option<BetType> {
        self.last_bet
    }
    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }
    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }
    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }

    pub fn is_active(&self) -> bool {
        self.state == PlayerState::Active
    }

    /// Still contesting the pot (active or all-in).
    pub fn in_hand(&self) -> bool {
        matches!(self.state, PlayerState::Active | PlayerState::AllIn)
    }

    pub(crate) fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    pub(crate) fn give_card(&mut self, c: Card) -> Result<(), String> {
        if self.hole.len() >= 2 {
            return Err("Hole cards already full".to_string());
        }
        self.hole.push(c);
        Ok(())
    }

    /// Moves up to `amount` from the stack into this round's bet, going all-in
    /// when the stack runs out. Returns the chips actually moved.
    pub(crate) fn increase_bet(&mut self, amount: Chips, bet_type: BetType) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        self.total_committed += paid;
        self.last_bet = Some(if self.stack == 0 {
            BetType::AllIn
        } else {
            bet_type
        });
        if self.stack == 0 && self.state == PlayerState::Active {
            self.state = PlayerState::AllIn;
        }
        paid
    }

    /// Hands this round's bet over to the pot.
    pub(crate) fn take_round_bet(&mut self) -> Chips {
        std::mem::take(&mut self.current_bet)
    }

    pub(crate) fn add_chips(&mut self, amount: Chips) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Clears per-hand fields ahead of the next hand.
    pub(crate) fn reset_for_next_hand(&mut self) {
        self.hole.clear();
        self.current_bet = 0;
        self.total_committed = 0;
        self.last_bet = None;
        self.state = if self.stack == 0 {
            PlayerState::SittingOut
        } else {
            PlayerState::Active
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn increase_bet_caps_at_stack_and_goes_all_in() {
        let mut seat = Seat::new(&SeatedPlayer::new("p", 30), 0);
        let paid = seat.increase_bet(50, BetType::BigBlind);
        assert_eq!(paid, 30);
        assert_eq!(seat.stack(), 0);
        assert_eq!(seat.current_bet(), 30);
        assert_eq!(seat.state(), PlayerState::AllIn);
        assert_eq!(seat.last_bet(), Some(BetType::AllIn));
    }

    #[test]
    fn zero_stack_sits_out() {
        let seat = Seat::new(&SeatedPlayer::new("broke", 0), 3);
        assert_eq!(seat.state(), PlayerState::SittingOut);
        assert_eq!(seat.position(), 3);
    }

    #[test]
    fn third_hole_card_is_rejected() {
        let mut seat = Seat::new(&SeatedPlayer::new("p", 10), 0);
        seat.give_card(Card::new(Rank::Ace, Suit::Spades)).unwrap();
        seat.give_card(Card::new(Rank::King, Suit::Spades)).unwrap();
        let err = seat.give_card(Card::new(Rank::Two, Suit::Clubs)).unwrap_err();
        assert!(err.contains("full"));
    }

    #[test]
    fn reset_clears_hand_commitments() {
        let mut seat = Seat::new(&SeatedPlayer::new("p", 100), 0);
        seat.increase_bet(10, BetType::BigBlind);
        seat.take_round_bet();
        seat.increase_bet(25, BetType::Raise);
        assert_eq!(seat.total_committed(), 35);
        seat.reset_for_next_hand();
        assert_eq!(seat.total_committed(), 0);
        assert_eq!(seat.current_bet(), 0);
        assert_eq!(seat.state(), PlayerState::Active);
    }
}
