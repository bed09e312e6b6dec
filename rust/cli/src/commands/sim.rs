//! Simulation command handler for seeded hand generation.
//!
//! Plays hands between random-policy seats, carrying stacks from hand to hand
//! and rebuying everyone once a single seat holds all the chips. Each
//! finished hand is checked for chip conservation and, when an output path
//! is given, appended to it as one JSON line.
//!
//! # Examples
//!
//! ```no_run
//! use std::io;
//! let args = vec!["suited", "sim", "--hands", "1000", "--seed", "42", "--output", "data/sim.jsonl"];
//! let code = suited_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use crate::config;
use crate::error::CliError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::io::Write;
use suited_engine::engine::{Engine, apply_action, legal_actions};
use suited_engine::errors::GameError;
use suited_engine::logger::{HandLogger, HandRecord};
use suited_engine::player::{Chips, PlayerAction, SeatedPlayer};
use suited_engine::rules::LegalAction;

/// Handle the sim command.
///
/// # Arguments
///
/// * `hands` - Number of hands to play (at least 1)
/// * `seed` - Seeds both the deck and the players' choices; falls back to
///   the configured seed, then to a random one
/// * `players` - Seats at the table; falls back to the configured count
/// * `output` - JSONL file receiving one `HandRecord` per hand
///
/// # Errors
///
/// `CliError::InvalidInput` for zero hands, `CliError::Invariant` if chips are
/// created or lost, and I/O or engine errors as they occur.
pub fn handle_sim_command(
    hands: u64,
    seed: Option<u64>,
    players: Option<usize>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let cfg = config::load()?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let count = players.unwrap_or(cfg.players);

    let mut logger = match output.as_deref() {
        Some(path) => HandLogger::create(path)?,
        None => HandLogger::detached(&chrono::Utc::now().format("%Y%m%d").to_string()),
    };

    let mut engine = Engine::new(Some(base_seed), cfg.blinds())?;
    let mut policy = ChaCha20Rng::seed_from_u64(base_seed ^ 0x5EED);
    let fresh_roster = || -> Vec<SeatedPlayer> {
        (0..count)
            .map(|i| SeatedPlayer::new(format!("P{}", i + 1), cfg.starting_stack))
            .collect()
    };
    let mut roster = fresh_roster();
    let total: Chips = roster.iter().map(|p| p.stack).sum();

    let mut showdowns = 0u64;
    let mut rebuys = 0u64;
    for n in 0..hands {
        let mut state = match engine.start_hand(&roster) {
            Ok(state) => state,
            Err(GameError::NotEnoughPlayers { .. }) => {
                tracing::info!(hand = n + 1, "one player holds every chip; rebuying");
                rebuys += 1;
                roster = fresh_roster();
                engine.start_hand(&roster)?
            }
            Err(e) => return Err(e.into()),
        };

        while let Some(actor) = state.current_actor() {
            let action = random_action(&mut policy, &legal_actions(&state, actor));
            state = apply_action(&state, actor, action)?;
        }

        if state.total_chips() != total {
            return Err(CliError::Invariant(format!(
                "hand {} ended with {} chips, expected {}",
                n + 1,
                state.total_chips(),
                total
            )));
        }
        for (player, seat) in roster.iter_mut().zip(state.seats()) {
            player.stack = seat.stack();
        }
        if state.result().is_some_and(|r| !r.uncontested) {
            showdowns += 1;
        }

        let hand_id = logger.next_id();
        logger.write(&HandRecord::from_state(hand_id, Some(base_seed), &state))?;
    }

    if rebuys > 0 {
        writeln!(err, "Rebought all stacks {} time(s)", rebuys)?;
    }
    writeln!(
        out,
        "Simulated {} hands ({} to showdown), seed {}",
        hands, showdowns, base_seed
    )?;
    for p in &roster {
        writeln!(out, "{}: {}", p.id, p.stack)?;
    }
    Ok(())
}

/// Uniform choice among the legal actions; raises pick a uniform amount.
fn random_action<R: Rng + ?Sized>(rng: &mut R, options: &[LegalAction]) -> PlayerAction {
    if options.is_empty() {
        return PlayerAction::Fold;
    }
    match options[rng.random_range(0..options.len())] {
        LegalAction::Fold => PlayerAction::Fold,
        LegalAction::Check => PlayerAction::Check,
        LegalAction::Call { .. } => PlayerAction::Call,
        LegalAction::Raise { min, max } => PlayerAction::Raise(rng.random_range(min..=max)),
        LegalAction::AllIn { .. } => PlayerAction::AllIn,
    }
}
