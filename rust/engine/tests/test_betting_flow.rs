use suited_engine::cards::parse_cards;
use suited_engine::deck::Deck;
use suited_engine::engine::{apply_action, current_result, legal_actions, start_hand, Engine};
use suited_engine::errors::GameError;
use suited_engine::game::{Blinds, HandState, Round};
use suited_engine::hand::Category;
use suited_engine::player::{PlayerAction as A, PlayerState, SeatedPlayer};
use suited_engine::rules::LegalAction;

fn players(stacks: &[u64]) -> Vec<SeatedPlayer> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| SeatedPlayer::new(format!("p{}", i), s))
        .collect()
}

fn three_handed() -> HandState {
    start_hand(&players(&[100, 100, 100]), Blinds::new(5, 10), None, Deck::ordered()).unwrap()
}

fn act(state: &HandState, seat: usize, action: A) -> HandState {
    apply_action(state, seat, action).unwrap_or_else(|e| panic!("seat {} {:?}: {}", seat, action, e))
}

#[test]
fn blinds_are_posted_and_utg_acts_first() {
    let state = three_handed();
    assert_eq!(state.round(), Round::Preflop);
    assert_eq!(state.dealer_index(), 0);
    assert_eq!(state.small_blind_index(), 1);
    assert_eq!(state.big_blind_index(), 2);
    assert_eq!(state.seats()[1].current_bet(), 5);
    assert_eq!(state.seats()[2].current_bet(), 10);
    assert_eq!(state.current_bet(), 10);
    assert_eq!(state.current_actor(), Some(0));
    assert!(state.seats().iter().all(|s| s.hole_cards().len() == 2));
    assert_eq!(state.deck().dealt(), 6);
}

#[test]
fn unraised_preflop_closes_after_small_blind_completes() {
    let state = three_handed();
    let state = act(&state, 0, A::Call);
    assert_eq!(state.round(), Round::Preflop);
    assert_eq!(state.current_actor(), Some(1));

    let state = act(&state, 1, A::Call);
    assert_eq!(state.round(), Round::Flop);
    assert_eq!(state.community_cards().len(), 3);
    assert_eq!(state.current_bet(), 0);
    assert_eq!(state.pot(), 30);
    // first active seat after the dealer opens the flop
    assert_eq!(state.current_actor(), Some(1));
}

#[test]
fn everyone_folds_to_big_blind() {
    let state = three_handed();
    let state = act(&state, 0, A::Fold);
    let state = act(&state, 1, A::Fold);

    assert_eq!(state.round(), Round::Ended);
    assert_eq!(state.current_actor(), None);
    assert_eq!(state.seats()[2].stack(), 105);
    assert_eq!(state.seats()[1].stack(), 95);
    assert_eq!(state.pot(), 0);
    assert!(state.community_cards().is_empty());

    let result = current_result(&state).unwrap();
    assert!(result.uncontested);
    assert_eq!(result.winners, vec![2]);
    assert_eq!(result.pot, 15);
    assert_eq!(result.category, None);
    assert!(result.showdown.is_empty());
}

#[test]
fn raise_legality() {
    let state = three_handed();
    assert_eq!(
        apply_action(&state, 0, A::Raise(10)),
        Err(GameError::InvalidRaise {
            amount: 10,
            current_bet: 10,
            max: 100
        })
    );
    assert!(matches!(
        apply_action(&state, 0, A::Raise(101)),
        Err(GameError::InvalidRaise { max: 100, .. })
    ));
    assert!(matches!(
        apply_action(&state, 0, A::Check),
        Err(GameError::IllegalAction(_))
    ));

    let state = act(&state, 0, A::Raise(30));
    assert_eq!(state.current_bet(), 30);
    assert_eq!(state.seats()[0].stack(), 70);
    assert_eq!(state.current_actor(), Some(1));
    assert_eq!(
        legal_actions(&state, 1),
        vec![
            LegalAction::Fold,
            LegalAction::Call { amount: 25 },
            LegalAction::Raise { min: 31, max: 100 },
            LegalAction::AllIn { amount: 95 },
        ]
    );

    let state = act(&state, 1, A::Call);
    let state = act(&state, 2, A::Call);
    assert_eq!(state.round(), Round::Flop);
    assert_eq!(state.pot(), 90);
}

#[test]
fn reraise_reopens_action_for_earlier_callers() {
    let state = three_handed();
    let state = act(&state, 0, A::Call);
    let state = act(&state, 1, A::Call);
    // big blind has no option by default, so the flop is out
    assert_eq!(state.round(), Round::Flop);

    let state = act(&state, 1, A::Raise(20));
    let state = act(&state, 2, A::Call);
    let state = act(&state, 0, A::Raise(50));
    assert_eq!(state.current_actor(), Some(1));
    assert_eq!(state.pending(), &[1, 2]);
    let state = act(&state, 1, A::Call);
    let state = act(&state, 2, A::Fold);
    assert_eq!(state.round(), Round::Turn);
    assert_eq!(state.pot(), 30 + 50 + 50 + 20);
}

#[test]
fn call_and_check_rules_after_the_flop() {
    let state = three_handed();
    let state = act(&state, 0, A::Call);
    let state = act(&state, 1, A::Call);
    assert!(matches!(
        apply_action(&state, 1, A::Call),
        Err(GameError::IllegalAction(_))
    ));
    let state = act(&state, 1, A::Check);
    let state = act(&state, 2, A::Check);
    let state = act(&state, 0, A::Check);
    assert_eq!(state.round(), Round::Turn);
    assert_eq!(state.community_cards().len(), 4);
}

#[test]
fn out_of_turn_and_finished_hands_are_rejected() {
    let state = three_handed();
    assert_eq!(
        apply_action(&state, 2, A::Fold),
        Err(GameError::OutOfTurn {
            expected: 0,
            actual: 2
        })
    );
    assert_eq!(apply_action(&state, 7, A::Fold), Err(GameError::InvalidSeat(7)));
    assert_eq!(current_result(&state), Err(GameError::NoResult));

    let state = act(&state, 0, A::Fold);
    let state = act(&state, 1, A::Fold);
    assert_eq!(
        apply_action(&state, 2, A::Check),
        Err(GameError::HandAlreadyComplete)
    );
    assert!(legal_actions(&state, 2).is_empty());
}

#[test]
fn not_enough_players() {
    let blinds = Blinds::new(5, 10);
    assert_eq!(
        start_hand(&players(&[100]), blinds, None, Deck::ordered()),
        Err(GameError::NotEnoughPlayers { count: 1 })
    );
    assert_eq!(
        start_hand(&players(&[100, 0, 0]), blinds, None, Deck::ordered()),
        Err(GameError::NotEnoughPlayers { count: 1 })
    );
    assert!(matches!(
        start_hand(&players(&[100; 10]), blinds, None, Deck::ordered()),
        Err(GameError::NotEnoughPlayers { count: 10 })
    ));
}

#[test]
fn short_big_blind_goes_all_in() {
    let state = start_hand(&players(&[100, 100, 4]), Blinds::new(5, 10), None, Deck::ordered())
        .unwrap();
    assert_eq!(state.seats()[2].state(), PlayerState::AllIn);
    assert_eq!(state.seats()[2].current_bet(), 4);
    assert_eq!(state.current_bet(), 10);
    assert_eq!(state.total_chips(), 204);
}

#[test]
fn tied_board_splits_pot_with_odd_chip_left_of_dealer() {
    // hole cards go 1, 2, 0 twice; then the flop, turn and river
    let deck = Deck::stacked(&parse_cards("2c 3c 4c 2d 3d 4d As Ks Qs Js Ts").unwrap()).unwrap();
    let state = start_hand(&players(&[100, 100, 100]), Blinds::new(5, 10), None, deck).unwrap();
    let state = act(&state, 0, A::Call);
    let state = act(&state, 1, A::Fold);
    assert_eq!(state.round(), Round::Flop);
    assert_eq!(state.pot(), 25);

    let mut state = state;
    while state.round().is_betting() {
        let seat = state.current_actor().unwrap();
        state = act(&state, seat, A::Check);
    }

    let result = current_result(&state).unwrap();
    assert_eq!(result.winners, vec![0, 2]);
    assert_eq!(result.category, Some(Category::RoyalFlush));
    assert_eq!(result.payout_for(2), 13);
    assert_eq!(result.payout_for(0), 12);
    assert_eq!(result.board.len(), 5);
    assert_eq!(state.seats()[0].stack(), 102);
    assert_eq!(state.seats()[1].stack(), 95);
    assert_eq!(state.seats()[2].stack(), 103);
    assert_eq!(state.total_chips(), 300);
}

#[test]
fn all_in_and_call_runs_out_the_board() {
    // heads-up: seat 1 then seat 0 receive cards
    let deck = Deck::stacked(&parse_cards("Ah 2c Ad 7d Ks 9s 5h 3d Jc").unwrap()).unwrap();
    let state = start_hand(&players(&[100, 100]), Blinds::new(5, 10), None, deck).unwrap();
    let state = act(&state, 0, A::AllIn);
    assert_eq!(state.current_bet(), 100);
    assert_eq!(state.current_actor(), Some(1));
    let state = act(&state, 1, A::Call);

    assert!(state.is_complete());
    let result = current_result(&state).unwrap();
    assert!(!result.uncontested);
    assert_eq!(result.board, parse_cards("Ks 9s 5h 3d Jc").unwrap());
    assert_eq!(result.winners, vec![1]);
    assert_eq!(result.category, Some(Category::OnePair));
    assert_eq!(result.description.as_deref(), Some("Pair of Aces"));
    assert_eq!(result.showdown.len(), 2);
    assert_eq!(state.seats()[1].stack(), 200);
    assert_eq!(state.seats()[0].stack(), 0);
    assert_eq!(state.seats()[0].state(), PlayerState::SittingOut);
}

#[test]
fn dealer_button_rotates_past_empty_seats() {
    let mut engine = Engine::new(Some(3), Blinds::new(1, 2)).unwrap();
    let roster = players(&[50, 0, 50, 50]);
    let dealers: Vec<usize> = (0..4)
        .map(|_| engine.start_hand(&roster).unwrap().dealer_index())
        .collect();
    assert_eq!(dealers, vec![0, 2, 3, 0]);
    assert_eq!(engine.hands_started(), 4);
}

#[test]
fn state_survives_json_round_trip_mid_hand() {
    let state = act(&three_handed(), 0, A::Raise(25));
    let json = serde_json::to_string(&state).unwrap();
    let restored: HandState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
    let next = act(&restored, 1, A::Fold);
    assert_eq!(next.current_actor(), Some(2));
}
