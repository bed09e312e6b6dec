use thiserror::Error;

use crate::cards::Card;
use crate::player::Chips;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("A hand needs 2 to 9 players with chips, got {count}")]
    NotEnoughPlayers { count: usize },
    #[error("It's not seat {actual}'s turn (expected seat {expected})")]
    OutOfTurn { expected: usize, actual: usize },
    #[error("Illegal action: {0}")]
    IllegalAction(String),
    #[error("Invalid raise to {amount}: must exceed {current_bet} and not exceed {max}")]
    InvalidRaise {
        amount: Chips,
        current_bet: Chips,
        max: Chips,
    },
    #[error("Need at least 5 distinct cards to evaluate, got {distinct}")]
    InvalidHand { distinct: usize },
    #[error("Settlement failed: {0}")]
    Settlement(String),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Hand still in progress")]
    HandInProgress,
    #[error("No result available before the hand ends")]
    NoResult,
    #[error("Seat {0} does not exist")]
    InvalidSeat(usize),
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Invalid table configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("Player {0} is already seated")]
    SeatTaken(String),
    #[error("Table is full ({0} seats)")]
    TableFull(usize),
    #[error("Player {0} is not at the table")]
    PlayerNotFound(String),
    #[error("Table {0} not found")]
    TableNotFound(String),
    #[error("Table state lock poisoned")]
    StoragePoisoned,
}
