//! Eval command handler: best five-card hand among the given cards.

use crate::error::CliError;
use crate::ui::format_cards;
use std::io::Write;
use suited_engine::cards::{Card, parse_cards};
use suited_engine::hand::evaluate_hand;

/// Handle the eval command.
///
/// Accepts cards as separate arguments or comma/space separated within one
/// argument.
///
/// # Errors
///
/// Returns `CliError::InvalidInput` for unparsable cards, repeated cards, or
/// a count outside 5 to 7.
pub fn handle_eval_command(cards: &[String], out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_args(cards)?;
    let strength = evaluate_hand(&cards).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    writeln!(out, "Cards: {}", format_cards(&cards))?;
    writeln!(out, "Category: {}", strength.category.name())?;
    writeln!(out, "Best five: {}", format_cards(&strength.cards))?;
    writeln!(out, "Description: {}", strength.describe())?;
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Vec<Card>, CliError> {
    let cards = parse_cards(&args.join(" ")).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "expected 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    for (i, c) in cards.iter().enumerate() {
        if cards[..i].contains(c) {
            return Err(CliError::InvalidInput(format!("card {} given twice", c)));
        }
    }
    Ok(cards)
}
