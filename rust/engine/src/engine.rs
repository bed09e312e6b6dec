use std::cmp::Ordering;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{next_index, Blinds, HandState, Round};
use crate::hand::{compare_hands, evaluate_hand};
use crate::logger::{ActionRecord, RecordedAction};
use crate::player::{BetType, Chips, PlayerAction, PlayerState, Seat, SeatedPlayer};
use crate::pot::{distribute, HandResult, ShowdownEntry};
use crate::rules::{legal_options, validate_action, LegalAction, ValidatedAction};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;

/// Seats `players`, posts the blinds and deals hole cards from `deck`.
///
/// The dealer button moves to the next seat with chips after
/// `previous_dealer`; on the first hand (`None`) it starts at seat 0.
///
/// # Errors
///
/// - [`GameError::NotEnoughPlayers`] - fewer than 2 or more than 9 seats, or
///   fewer than 2 seats with chips
/// - [`GameError::InvalidConfig`] - blinds out of order, or stacks whose sum
///   does not fit in [`Chips`]
/// - [`GameError::DeckExhausted`] - `deck` ran out while dealing
pub fn start_hand(
    players: &[SeatedPlayer],
    blinds: Blinds,
    previous_dealer: Option<usize>,
    deck: Deck,
) -> Result<HandState, GameError> {
    begin_hand(1, players, blinds, previous_dealer, deck)
}

fn begin_hand(
    hand_id: u64,
    players: &[SeatedPlayer],
    blinds: Blinds,
    previous_dealer: Option<usize>,
    deck: Deck,
) -> Result<HandState, GameError> {
    blinds.validate()?;
    let n = players.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
        return Err(GameError::NotEnoughPlayers { count: n });
    }
    let funded = players.iter().filter(|p| p.stack > 0).count();
    if funded < MIN_PLAYERS {
        return Err(GameError::NotEnoughPlayers { count: funded });
    }
    players
        .iter()
        .try_fold(0, |total: Chips, p| total.checked_add(p.stack))
        .ok_or_else(|| GameError::InvalidConfig("total stacks exceed the chip range".into()))?;

    let mut seats: Vec<Seat> = players
        .iter()
        .enumerate()
        .map(|(i, p)| Seat::new(p, i))
        .collect();
    let eligible = |i: usize| seats[i].is_active();
    let not_found = GameError::NotEnoughPlayers { count: funded };
    let dealer = next_index(n, previous_dealer.map_or(n - 1, |d| d % n), eligible)
        .ok_or_else(|| not_found.clone())?;
    let small_blind = if funded == 2 {
        dealer
    } else {
        next_index(n, dealer, eligible).ok_or_else(|| not_found.clone())?
    };
    let big_blind = next_index(n, small_blind, eligible).ok_or(not_found)?;
    seats[dealer].is_dealer = true;
    seats[small_blind].is_small_blind = true;
    seats[big_blind].is_big_blind = true;

    let mut state = HandState {
        hand_id,
        round: Round::Preflop,
        seats,
        pot: 0,
        current_bet: 0,
        current_actor: None,
        dealer_index: dealer,
        small_blind_index: small_blind,
        big_blind_index: big_blind,
        community: Vec::with_capacity(5),
        deck,
        blinds,
        pending: Vec::new(),
        history: Vec::new(),
        result: None,
    };

    let order = state.active_after(dealer);
    for _ in 0..2 {
        for &i in &order {
            let card = state.deck.deal()?;
            state.seats[i]
                .give_card(card)
                .map_err(GameError::IllegalAction)?;
        }
    }

    let sb_paid = state.seats[small_blind].increase_bet(blinds.small, BetType::SmallBlind);
    state.history.push(ActionRecord {
        seat: small_blind,
        round: Round::Preflop,
        action: RecordedAction::SmallBlind(sb_paid),
    });
    let bb_paid = state.seats[big_blind].increase_bet(blinds.big, BetType::BigBlind);
    state.history.push(ActionRecord {
        seat: big_blind,
        round: Round::Preflop,
        action: RecordedAction::BigBlind(bb_paid),
    });
    state.current_bet = blinds.big;

    state.pending = state
        .active_after(big_blind)
        .into_iter()
        .filter(|&i| i != big_blind || blinds.big_blind_option)
        .collect();

    info!(
        hand_id,
        players = n,
        dealer,
        small_blind,
        big_blind,
        "hand started"
    );

    if state.pending.is_empty() {
        close_round(&mut state)?;
    } else {
        state.current_actor = next_pending(&state, big_blind);
    }
    Ok(state)
}

/// Applies `action` by `seat` and returns the resulting state.
///
/// `state` itself is never modified, so a rejected action leaves nothing
/// half-applied.
///
/// # Errors
///
/// - [`GameError::NoHandInProgress`] / [`GameError::HandAlreadyComplete`] -
///   the hand is not in a betting round
/// - [`GameError::InvalidSeat`] - no such seat
/// - [`GameError::OutOfTurn`] - `seat` is not the current actor
/// - [`GameError::IllegalAction`] / [`GameError::InvalidRaise`] - the action
///   breaks the betting rules
///
/// # Examples
///
/// ```
/// use suited_engine::deck::Deck;
/// use suited_engine::engine::{apply_action, start_hand};
/// use suited_engine::game::{Blinds, Round};
/// use suited_engine::player::{PlayerAction, SeatedPlayer};
///
/// let players: Vec<_> = ["a", "b", "c"]
///     .iter()
///     .map(|id| SeatedPlayer::new(*id, 100))
///     .collect();
/// let state = start_hand(&players, Blinds::new(5, 10), None, Deck::ordered()).unwrap();
///
/// // seat 0 is under the gun, then the small blind completes
/// let state = apply_action(&state, 0, PlayerAction::Call).unwrap();
/// let state = apply_action(&state, 1, PlayerAction::Call).unwrap();
/// assert_eq!(state.round(), Round::Flop);
/// assert_eq!(state.community_cards().len(), 3);
/// assert_eq!(state.current_bet(), 0);
/// ```
pub fn apply_action(
    state: &HandState,
    seat: usize,
    action: PlayerAction,
) -> Result<HandState, GameError> {
    match state.round {
        Round::Waiting => return Err(GameError::NoHandInProgress),
        Round::Showdown | Round::Ended => return Err(GameError::HandAlreadyComplete),
        _ => {}
    }
    let acting = state.seats.get(seat).ok_or(GameError::InvalidSeat(seat))?;
    let expected = state.current_actor.ok_or(GameError::HandAlreadyComplete)?;
    if seat != expected {
        return Err(GameError::OutOfTurn {
            expected,
            actual: seat,
        });
    }
    if !acting.is_active() {
        return Err(GameError::IllegalAction(format!(
            "seat {} is {:?}",
            seat,
            acting.state()
        )));
    }
    let committed = acting.current_bet();
    let validated = validate_action(acting.stack(), committed, state.current_bet, action)?;

    let mut next = state.clone();
    let round = next.round;
    let recorded = match validated {
        ValidatedAction::Fold => {
            next.seats[seat].set_state(PlayerState::Folded);
            RecordedAction::Fold
        }
        ValidatedAction::Check => RecordedAction::Check,
        ValidatedAction::Call(amount) => {
            RecordedAction::Call(next.seats[seat].increase_bet(amount, BetType::Call))
        }
        ValidatedAction::Raise(to) => {
            next.seats[seat].increase_bet(to - committed, BetType::Raise);
            next.current_bet = to;
            reopen(&mut next, seat);
            RecordedAction::Raise(to)
        }
        ValidatedAction::AllIn(stack) => {
            let paid = next.seats[seat].increase_bet(stack, BetType::AllIn);
            let total = next.seats[seat].current_bet();
            if total > next.current_bet {
                next.current_bet = total;
                reopen(&mut next, seat);
            }
            RecordedAction::AllIn(paid)
        }
    };
    next.pending.retain(|&i| i != seat);
    next.history.push(ActionRecord {
        seat,
        round,
        action: recorded,
    });
    debug!(
        hand_id = next.hand_id,
        seat,
        round = ?round,
        action = ?recorded,
        current_bet = next.current_bet,
        "action applied"
    );

    after_action(&mut next, seat)?;
    Ok(next)
}

/// Actions `seat` may take right now; empty when it is not that seat's turn.
pub fn legal_actions(state: &HandState, seat: usize) -> Vec<LegalAction> {
    if !state.round.is_betting() || state.current_actor != Some(seat) {
        return Vec::new();
    }
    match state.seats.get(seat) {
        Some(s) if s.is_active() => legal_options(s.stack(), s.current_bet(), state.current_bet),
        _ => Vec::new(),
    }
}

/// Settlement record of a finished hand.
pub fn current_result(state: &HandState) -> Result<&HandResult, GameError> {
    if state.round != Round::Ended {
        return Err(GameError::NoResult);
    }
    state.result.as_ref().ok_or(GameError::NoResult)
}

// A raise puts every other seat that can still act back on the hook.
fn reopen(state: &mut HandState, raiser: usize) {
    state.pending = state
        .active_after(raiser)
        .into_iter()
        .filter(|&i| i != raiser)
        .collect();
}

fn next_pending(state: &HandState, from: usize) -> Option<usize> {
    state.next_seat(from, |i, s| s.is_active() && state.pending.contains(&i))
}

fn after_action(state: &mut HandState, last: usize) -> Result<(), GameError> {
    if state.in_hand_count() <= 1 {
        return settle_uncontested(state);
    }
    let seats = &state.seats;
    state.pending.retain(|&i| seats[i].is_active());
    match next_pending(state, last) {
        Some(actor) => {
            state.current_actor = Some(actor);
            Ok(())
        }
        None => close_round(state),
    }
}

/// Sweeps the round's bets and deals the next street. Streets keep coming
/// without betting while fewer than two seats can act.
fn close_round(state: &mut HandState) -> Result<(), GameError> {
    loop {
        state.collect_bets();
        let (next_round, cards) = match state.round {
            Round::Preflop => (Round::Flop, 3),
            Round::Flop => (Round::Turn, 1),
            Round::Turn => (Round::River, 1),
            Round::River => return showdown(state),
            Round::Waiting => return Err(GameError::NoHandInProgress),
            Round::Showdown | Round::Ended => return Err(GameError::HandAlreadyComplete),
        };
        for _ in 0..cards {
            let card = state.deck.deal()?;
            state.community.push(card);
        }
        state.round = next_round;
        debug!(
            hand_id = state.hand_id,
            round = ?next_round,
            board = %board_string(state),
            pot = state.pot,
            "round dealt"
        );

        if state.active_count() >= 2 {
            state.pending = state.active_after(state.dealer_index);
            state.current_actor = state.pending.first().copied();
            return Ok(());
        }
        state.pending.clear();
        state.current_actor = None;
    }
}

fn showdown(state: &mut HandState) -> Result<(), GameError> {
    state.round = Round::Showdown;
    state.current_actor = None;
    state.pending.clear();

    let mut entries = Vec::new();
    for (i, seat) in state.seats.iter().enumerate() {
        if !seat.in_hand() {
            continue;
        }
        let mut cards = seat.hole_cards().to_vec();
        cards.extend_from_slice(&state.community);
        entries.push(ShowdownEntry {
            seat: i,
            player_id: seat.player_id().to_string(),
            hole: seat.hole_cards().to_vec(),
            strength: evaluate_hand(&cards)?,
        });
    }
    let best = entries
        .iter()
        .map(|e| &e.strength)
        .max_by(|a, b| compare_hands(a, b))
        .cloned()
        .ok_or_else(|| GameError::Settlement("no hands at showdown".into()))?;
    let winners: Vec<usize> = entries
        .iter()
        .filter(|e| compare_hands(&e.strength, &best) == Ordering::Equal)
        .map(|e| e.seat)
        .collect();

    let board = state.community.clone();
    let pot = state.total_pot();
    let payouts = distribute(state, &winners)?;
    info!(
        hand_id = state.hand_id,
        pot,
        winners = ?winners,
        hand = %best.describe(),
        "hand settled at showdown"
    );
    state.result = Some(HandResult {
        hand_id: state.hand_id,
        winners,
        payouts,
        category: Some(best.category),
        description: Some(best.describe()),
        showdown: entries,
        board,
        pot,
        uncontested: false,
    });
    state.round = Round::Ended;
    Ok(())
}

fn settle_uncontested(state: &mut HandState) -> Result<(), GameError> {
    let winner = state
        .seats
        .iter()
        .position(Seat::in_hand)
        .ok_or_else(|| GameError::Settlement("every seat folded".into()))?;
    let board = state.community.clone();
    let pot = state.total_pot();
    let payouts = distribute(state, &[winner])?;
    info!(
        hand_id = state.hand_id,
        pot,
        winner,
        "hand settled uncontested"
    );
    state.result = Some(HandResult {
        hand_id: state.hand_id,
        winners: vec![winner],
        payouts,
        category: None,
        description: None,
        showdown: Vec::new(),
        board,
        pot,
        uncontested: true,
    });
    state.round = Round::Ended;
    Ok(())
}

fn board_string(state: &HandState) -> String {
    state
        .community
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs consecutive hands at one table with a seeded deck and a rotating
/// dealer button.
///
/// # Examples
///
/// ```
/// use suited_engine::engine::Engine;
/// use suited_engine::game::Blinds;
/// use suited_engine::player::SeatedPlayer;
///
/// let mut engine = Engine::new(Some(12345), Blinds::new(1, 2)).unwrap();
/// let players = vec![SeatedPlayer::new("a", 100), SeatedPlayer::new("b", 100)];
///
/// let first = engine.start_hand(&players).unwrap();
/// let second = engine.start_hand(&players).unwrap();
/// assert_eq!(first.dealer_index(), 0);
/// assert_eq!(second.dealer_index(), 1);
/// assert_eq!(second.hand_id(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    rng: ChaCha20Rng,
    seed: u64,
    blinds: Blinds,
    previous_dealer: Option<usize>,
    hands_started: u64,
}

impl Engine {
    /// Creates an engine dealing from `seed`, or from a fresh OS-entropy seed
    /// when `None`. The seed in use is reported by [`Engine::seed`].
    pub fn new(seed: Option<u64>, blinds: Blinds) -> Result<Self, GameError> {
        blinds.validate()?;
        let seed = seed.unwrap_or_else(rand::random);
        Ok(Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
            blinds,
            previous_dealer: None,
            hands_started: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn blinds(&self) -> Blinds {
        self.blinds
    }
    pub fn previous_dealer(&self) -> Option<usize> {
        self.previous_dealer
    }
    pub fn hands_started(&self) -> u64 {
        self.hands_started
    }

    /// Moves the stored button, e.g. after the seat list changed.
    pub fn set_previous_dealer(&mut self, dealer: Option<usize>) {
        self.previous_dealer = dealer;
    }

    /// Shuffles a fresh deck and starts the next hand.
    pub fn start_hand(&mut self, players: &[SeatedPlayer]) -> Result<HandState, GameError> {
        let deck = Deck::shuffled(&mut self.rng);
        let state = begin_hand(
            self.hands_started + 1,
            players,
            self.blinds,
            self.previous_dealer,
            deck,
        )?;
        self.hands_started += 1;
        self.previous_dealer = Some(state.dealer_index);
        Ok(state)
    }
}
