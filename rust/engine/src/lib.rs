//! # suited-engine: Texas Hold'em Table Rules Engine
//!
//! The rules of a single no-limit Hold'em table for 2 to 9 seats: dealing,
//! blinds, betting rounds, hand evaluation and pot settlement. Every hand is a
//! plain serializable [`game::HandState`] value that only the engine's
//! operations advance, so a table's authority can be replicated, logged and
//! replayed from a seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`engine`] - Hand start, action processing and round progression
//! - [`game`] - Hand state, rounds and blind configuration
//! - [`hand`] - Poker hand evaluation and strength comparison
//! - [`player`] - Seats, player actions and stack bookkeeping
//! - [`pot`] - Pot splitting and settlement records
//! - [`rules`] - Betting validation and legal action listing
//! - [`table`] - Seating and per-table action serialization
//! - [`logger`] - Action history and JSONL hand records
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use suited_engine::cards::parse_cards;
//! use suited_engine::hand::{evaluate_hand, Category};
//!
//! // Evaluate a 7-card poker hand
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let strength = evaluate_hand(&cards).unwrap();
//! assert_eq!(strength.category, Category::RoyalFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use suited_engine::engine::Engine;
//! use suited_engine::game::Blinds;
//! use suited_engine::player::{PlayerAction, SeatedPlayer};
//!
//! let mut engine = Engine::new(Some(42), Blinds::new(5, 10)).unwrap();
//! let players = vec![SeatedPlayer::new("alice", 100), SeatedPlayer::new("bob", 100)];
//!
//! let state = engine.start_hand(&players).unwrap();
//! let actor = state.current_actor().unwrap();
//! let state = suited_engine::engine::apply_action(&state, actor, PlayerAction::Fold).unwrap();
//! assert!(state.is_complete());
//! assert_eq!(state.total_chips(), 200);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod table;
