//! Pot settlement: paying the winners and clearing the table for the next
//! hand.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::{HandState, Round};
use crate::hand::{Category, HandStrength};
use crate::player::Chips;

/// Chips credited to one winning seat.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub seat: usize,
    pub player_id: String,
    pub amount: Chips,
}

/// A hand shown down at the end of the river.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownEntry {
    pub seat: usize,
    pub player_id: String,
    pub hole: Vec<Card>,
    pub strength: HandStrength,
}

/// End-of-hand settlement record for wallet reconciliation and broadcast.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub hand_id: u64,
    /// Winning seats in seat order
    pub winners: Vec<usize>,
    pub payouts: Vec<Payout>,
    /// Winning category; `None` when everyone else folded
    pub category: Option<Category>,
    pub description: Option<String>,
    pub showdown: Vec<ShowdownEntry>,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub uncontested: bool,
}

impl HandResult {
    pub fn payout_for(&self, seat: usize) -> Chips {
        self.payouts
            .iter()
            .filter(|p| p.seat == seat)
            .map(|p| p.amount)
            .sum()
    }
}

/// Splits `pot` evenly between `winners`.
///
/// Odd units go one at a time to the winners closest to the left of the
/// dealer. Returned shares follow the order of `winners`.
pub fn split_pot(pot: Chips, winners: &[usize], dealer: usize, seat_count: usize) -> Vec<Chips> {
    if winners.is_empty() || seat_count == 0 {
        return Vec::new();
    }
    let n = winners.len() as Chips;
    let share = pot / n;
    let mut odd = pot % n;
    let mut shares = vec![share; winners.len()];

    let mut by_distance: Vec<usize> = (0..winners.len()).collect();
    by_distance.sort_by_key(|&i| (winners[i] + seat_count - dealer - 1) % seat_count);
    for i in by_distance {
        if odd == 0 {
            break;
        }
        shares[i] += 1;
        odd -= 1;
    }
    shares
}

/// Pays the pot to `winners` and resets per-hand seat state.
///
/// Valid only at showdown or once every other seat has folded. Any bets still
/// in front of the seats are collected first. Afterwards the pot is zero, every
/// seat with chips is active again with no bet, and all hole and community
/// cards are cleared.
pub fn distribute(state: &mut HandState, winners: &[usize]) -> Result<Vec<Payout>, GameError> {
    let uncontested = state.round.is_betting() && state.in_hand_count() == 1;
    if state.round != Round::Showdown && !uncontested {
        return Err(GameError::Settlement(format!(
            "cannot settle during {:?}",
            state.round
        )));
    }
    if winners.is_empty() {
        return Err(GameError::Settlement("no winners given".into()));
    }
    for &w in winners {
        match state.seats.get(w) {
            Some(seat) if seat.in_hand() => {}
            Some(_) => {
                return Err(GameError::Settlement(format!(
                    "seat {} is not contesting the pot",
                    w
                )))
            }
            None => return Err(GameError::InvalidSeat(w)),
        }
    }

    state.collect_bets();
    let shares = split_pot(state.pot, winners, state.dealer_index, state.seats.len());
    let mut payouts = Vec::with_capacity(winners.len());
    for (&w, amount) in winners.iter().zip(shares) {
        let seat = &mut state.seats[w];
        seat.add_chips(amount);
        payouts.push(Payout {
            seat: w,
            player_id: seat.player_id().to_string(),
            amount,
        });
    }
    state.pot = 0;

    for seat in &mut state.seats {
        seat.reset_for_next_hand();
    }
    state.community.clear();
    state.pending.clear();
    state.current_actor = None;
    Ok(payouts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_has_no_odd_chip() {
        assert_eq!(split_pot(100, &[0, 2], 1, 3), vec![50, 50]);
    }

    #[test]
    fn odd_chip_goes_left_of_dealer() {
        // dealer 1: seat 2 sits closest to the left, then seat 0
        assert_eq!(split_pot(101, &[0, 2], 1, 3), vec![50, 51]);
        // dealer 2: seat 0 is first
        assert_eq!(split_pot(101, &[0, 2], 2, 3), vec![51, 50]);
    }

    #[test]
    fn three_way_split_hands_out_two_odd_chips() {
        let shares = split_pot(20, &[0, 1, 2], 0, 3);
        assert_eq!(shares, vec![6, 7, 7]);
        assert_eq!(shares.iter().sum::<Chips>(), 20);
    }
}
