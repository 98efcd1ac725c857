//! End-to-end scenarios driven through the public session API with forced rolls.

use chausar::{
    Cell, ExtraTurn, GameEvent, GameSession, Movement, PlayerId, RollOutcome, ScriptedDice,
    TokenId, TokenState, TurnError, TurnPhase, TurnResolution, path,
};
use std::sync::mpsc;

fn tid(player: u8, slot: u8) -> TokenId {
    TokenId::new(PlayerId(player), slot)
}

fn two_player(script: &[u8]) -> GameSession {
    GameSession::new_game(2, &["Ravi", "Asha"], ScriptedDice::new(script).unwrap()).unwrap()
}

/// Rolls for `player` and moves `token`, panicking on any rejection.
fn turn(game: &mut GameSession, player: u8, token: TokenId) -> chausar::MoveOutcome {
    match game.roll(PlayerId(player)).expect("roll accepted") {
        RollOutcome::MustSelect { legal, .. } => {
            assert!(legal.contains(&token), "{token} should be legal, got {legal:?}");
            game.select_token(PlayerId(player), token).expect("move accepted")
        }
        RollOutcome::NoLegalMove { face, .. } => panic!("rolled {face} with nothing to move"),
    }
}

#[test]
fn test_fresh_game_six_leaves_base() {
    let mut game = GameSession::new_game(
        4,
        &["Ravi", "Asha", "Bela", "Dev"],
        ScriptedDice::new(&[6]).unwrap(),
    )
    .unwrap();

    let moved = turn(&mut game, 0, tid(0, 0));

    assert_eq!(moved.movement, Movement::LeftBase { to: path::COMMON_PATH[0] });
    let token = &game.state().players()[0].tokens()[0];
    assert_eq!(token.state(), TokenState::OnTrack { step: 0 });
    assert_eq!(game.current_player(), PlayerId(0));
    assert_eq!(game.phase(), TurnPhase::AwaitingRoll);
}

#[test]
fn test_capture_without_six_keeps_turn() {
    let mut game = two_player(&[6, 6, 6, 2, 6, 5, 4]);

    // Red walks to step 14
    turn(&mut game, 0, tid(0, 0));
    turn(&mut game, 0, tid(0, 0));
    turn(&mut game, 0, tid(0, 0));
    let moved = turn(&mut game, 0, tid(0, 0));
    assert_eq!(moved.resolution, TurnResolution::Pass { next: PlayerId(1) });

    // Green enters and stops on track index 18
    turn(&mut game, 1, tid(1, 0));
    let moved = turn(&mut game, 1, tid(1, 0));
    assert_eq!(moved.resolution, TurnResolution::Pass { next: PlayerId(0) });
    assert_eq!(game.state().players()[1].tokens()[0].cell(), Some(Cell::new(6, 9)));

    // Red rolls a 4 and lands on it
    let moved = turn(&mut game, 0, tid(0, 0));
    assert_eq!(moved.captured, vec![tid(1, 0)]);
    assert_eq!(moved.extra_turn(), Some(ExtraTurn::Capture));
    assert_eq!(game.current_player(), PlayerId(0));
    assert!(game.state().players()[1].tokens()[0].is_in_base());
    assert_eq!(game.state().players()[1].tokens()[0].position(), None);
    assert_eq!(game.tokens_in_base(PlayerId(1)), Some(4));
}

#[test]
fn test_no_legal_move_reports_and_passes() {
    let mut game = two_player(&[3, 1]);
    let (tx, rx) = mpsc::channel();
    game.subscribe(tx);

    let rolled = game.roll(PlayerId(0)).unwrap();
    assert!(matches!(rolled, RollOutcome::NoLegalMove { next: PlayerId(1), .. }));
    assert!(!game.has_legal_move());

    let rolled = game.roll(PlayerId(1)).unwrap();
    assert!(matches!(rolled, RollOutcome::NoLegalMove { next: PlayerId(0), .. }));

    let passes = rx
        .try_iter()
        .filter(|e| matches!(e, GameEvent::TurnChanged { .. }))
        .count();
    assert_eq!(passes, 2);
}

#[test]
fn test_non_current_player_rejected_with_state_intact() {
    let mut game = two_player(&[6]);
    let before = game.snapshot();

    let err = game.roll(PlayerId(1)).unwrap_err();
    assert!(matches!(err, TurnError::NotCurrentPlayer { .. }));
    assert!(err.to_string().contains("not player 1's turn"));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_legal_tokens_query_does_not_mutate() {
    let mut game = two_player(&[6]);
    assert!(game.legal_tokens().is_empty());
    game.roll(PlayerId(0)).unwrap();

    let before = game.snapshot();
    assert_eq!(game.legal_tokens().len(), 4);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_snapshot_serializes_for_renderers() {
    let mut game = two_player(&[6]);
    turn(&mut game, 0, tid(0, 1));

    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["phase"]["phase"], "awaiting_roll");
    assert_eq!(json["last_roll"], 6);
    assert_eq!(json["players"][0]["tokens"][1]["state"]["state"], "on_track");
    assert_eq!(json["players"][0]["tokens"][1]["state"]["step"], 0);
    assert_eq!(json["players"][1]["color"], "green");
}
