//! Deal command handler: plays a single passive hand and prints it.
//!
//! Every seat checks when it can and calls otherwise, so the hand always
//! reaches showdown. The seed makes the output reproducible.

use crate::config;
use crate::error::CliError;
use crate::ui::format_cards;
use std::io::Write;
use suited_engine::engine::{Engine, apply_action, current_result, legal_actions};
use suited_engine::player::{PlayerAction, SeatedPlayer};
use suited_engine::rules::LegalAction;

/// Handle the deal command.
///
/// `seed` and `players` override the configured values.
///
/// # Errors
///
/// Returns `CliError::Config` for an invalid configuration and
/// `CliError::Engine` if the engine rejects the hand.
pub fn handle_deal_command(
    seed: Option<u64>,
    players: Option<usize>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let count = players.unwrap_or(cfg.players);

    let roster: Vec<SeatedPlayer> = (0..count)
        .map(|i| SeatedPlayer::new(format!("P{}", i + 1), cfg.starting_stack))
        .collect();
    let mut engine = Engine::new(Some(seed), cfg.blinds())?;
    let mut state = engine.start_hand(&roster)?;

    writeln!(out, "Seed: {}", seed)?;
    for (i, seat) in state.seats().iter().enumerate() {
        let mut role = String::new();
        if i == state.dealer_index() {
            role.push_str(" [D]");
        }
        if i == state.small_blind_index() {
            role.push_str(" [SB]");
        }
        if i == state.big_blind_index() {
            role.push_str(" [BB]");
        }
        writeln!(
            out,
            "Hole {}: {}{}",
            seat.player_id(),
            format_cards(seat.hole_cards()),
            role
        )?;
    }

    while let Some(actor) = state.current_actor() {
        let action = if legal_actions(&state, actor).contains(&LegalAction::Check) {
            PlayerAction::Check
        } else {
            PlayerAction::Call
        };
        state = apply_action(&state, actor, action)?;
    }

    let result = current_result(&state)?;
    writeln!(out, "Board: {}", format_cards(&result.board))?;
    for payout in &result.payouts {
        writeln!(
            out,
            "Winner: {} +{}{}",
            payout.player_id,
            payout.amount,
            result
                .description
                .as_ref()
                .map(|d| format!(" ({})", d))
                .unwrap_or_default()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn deal(seed: u64, players: usize) -> String {
        unsafe {
            std::env::remove_var("SUITED_CONFIG");
        }
        let mut out = Vec::new();
        handle_deal_command(Some(seed), Some(players), &mut out).expect("deal should succeed");
        String::from_utf8(out).unwrap()
    }

    #[test]
    #[serial]
    fn deal_prints_every_seat_board_and_winner() {
        let output = deal(42, 4);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Seed: 42");
        assert_eq!(lines.iter().filter(|l| l.starts_with("Hole P")).count(), 4);
        let board = lines
            .iter()
            .find(|l| l.starts_with("Board: "))
            .expect("board line");
        assert_eq!(board.split_whitespace().count(), 6);
        assert!(lines.iter().any(|l| l.starts_with("Winner: ")));
        assert!(output.contains("[D]"));
    }

    #[test]
    #[serial]
    fn deal_is_deterministic_for_a_seed() {
        assert_eq!(deal(12345, 3), deal(12345, 3));
    }
}
