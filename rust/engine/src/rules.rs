use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::{Chips, PlayerAction as A};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips to move from the stack
    Call(Chips),
    /// New table bet for the round
    Raise(Chips),
    /// Entire remaining stack
    AllIn(Chips),
}

/// A move the acting seat may currently make, as offered to UI layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalAction {
    Fold,
    Check,
    Call { amount: Chips },
    Raise { min: Chips, max: Chips },
    AllIn { amount: Chips },
}

/// Validates a player action against the round's betting state.
///
/// # Arguments
///
/// * `stack` - Chips the seat still holds
/// * `committed` - Chips the seat already put in this round
/// * `current_bet` - The round's target bet
/// * `action` - The action the player wishes to perform
///
/// # Errors
///
/// - [`GameError::IllegalAction`] - checking while facing a bet, calling with
///   nothing owed, or going all-in with an empty stack
/// - [`GameError::InvalidRaise`] - raise not above the current bet, or above
///   what the seat can put in (use `AllIn` instead)
///
/// # Examples
///
/// ```
/// use suited_engine::rules::{validate_action, ValidatedAction};
/// use suited_engine::player::PlayerAction;
///
/// // Facing 10 with 5 already in: a call moves 5 more
/// let result = validate_action(100, 5, 10, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::Call(5)));
///
/// // A short stack can only call all-in
/// let result = validate_action(3, 5, 10, PlayerAction::Call);
/// assert_eq!(result, Ok(ValidatedAction::AllIn(3)));
/// ```
///
/// ```
/// use suited_engine::rules::validate_action;
/// use suited_engine::player::PlayerAction;
/// use suited_engine::errors::GameError;
///
/// // Invalid: check when facing a bet
/// let result = validate_action(100, 0, 10, PlayerAction::Check);
/// assert!(matches!(result, Err(GameError::IllegalAction(_))));
///
/// // Invalid: raise that does not exceed the current bet
/// let result = validate_action(100, 0, 10, PlayerAction::Raise(10));
/// assert!(matches!(result, Err(GameError::InvalidRaise { .. })));
/// ```
pub fn validate_action(
    stack: Chips,
    committed: Chips,
    current_bet: Chips,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let to_call = current_bet.saturating_sub(committed);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::IllegalAction(format!(
                    "cannot check facing {} to call",
                    to_call
                )))
            }
        }
        A::Call => {
            if to_call == 0 {
                Err(GameError::IllegalAction("nothing to call".to_string()))
            } else if stack <= to_call {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::Raise(amount) => {
            let max = stack + committed;
            if amount <= current_bet || amount > max {
                Err(GameError::InvalidRaise {
                    amount,
                    current_bet,
                    max,
                })
            } else if amount == max {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Raise(amount))
            }
        }
        A::AllIn => {
            if stack == 0 {
                Err(GameError::IllegalAction("no chips left".to_string()))
            } else {
                Ok(ValidatedAction::AllIn(stack))
            }
        }
    }
}

/// Every action [`validate_action`] would accept for these amounts.
pub fn legal_options(stack: Chips, committed: Chips, current_bet: Chips) -> Vec<LegalAction> {
    let to_call = current_bet.saturating_sub(committed);
    let mut v = vec![LegalAction::Fold];
    if to_call == 0 {
        v.push(LegalAction::Check);
    } else if stack > to_call {
        v.push(LegalAction::Call { amount: to_call });
    }
    if stack + committed > current_bet {
        v.push(LegalAction::Raise {
            min: current_bet + 1,
            max: stack + committed,
        });
    }
    if stack > 0 {
        v.push(LegalAction::AllIn { amount: stack });
    }
    v
}
