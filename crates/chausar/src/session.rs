//! Game session: the single owned root of a game in progress.
//!
//! A session owns the [`GameState`], the injected dice and the subscribers
//! that hear about committed events. Every call either commits a complete new
//! state or returns a [`TurnError`] with the state untouched.

use crate::action::Action;
use crate::capture;
use crate::contracts::{Contract, RollContract, SelectContract};
use crate::dice::{DiceSource, RandomDice};
use crate::error::{SetupError, TurnError};
use crate::events::{ActionOutcome, EventSink, GameEvent, MoveOutcome, Movement, RollOutcome};
use crate::path;
use crate::phases::TurnPhase;
use crate::player::Player;
use crate::scoreboard::WinRecorder;
use crate::state::GameState;
use crate::turn::{self, TurnResolution};
use crate::types::{Color, DieFace, MAX_PLAYERS, MIN_PLAYERS, PlayerId, TokenId};
use crate::win;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Checks a player count and name list before a game is created.
///
/// # Errors
///
/// Returns `SetupError` if the count is outside `2..=4`, the number of names
/// differs from the count, or a name is blank.
#[instrument(skip(names))]
pub fn validate_setup<S: AsRef<str>>(player_count: usize, names: &[S]) -> Result<(), SetupError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
        return Err(SetupError::PlayerCount(player_count));
    }
    if names.len() != player_count {
        return Err(SetupError::NameCount {
            expected: player_count,
            got: names.len(),
        });
    }
    if let Some(seat) = names.iter().position(|n| n.as_ref().trim().is_empty()) {
        return Err(SetupError::BlankName(seat));
    }
    Ok(())
}

/// One game from setup to win.
pub struct GameSession {
    state: GameState,
    dice: Box<dyn DiceSource>,
    sinks: Vec<Box<dyn EventSink>>,
    recorders: Vec<Box<dyn WinRecorder>>,
}

impl GameSession {
    /// Seats `player_count` players (2-4) and starts with seat 0 to roll.
    ///
    /// Seats are colored red, green, yellow, blue in order.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` for an invalid count or name list.
    #[instrument(skip(names, dice))]
    pub fn new_game<S: AsRef<str>>(
        player_count: usize,
        names: &[S],
        dice: impl DiceSource + 'static,
    ) -> Result<Self, SetupError> {
        validate_setup(player_count, names)?;
        let players = names
            .iter()
            .zip(Color::iter())
            .enumerate()
            .map(|(seat, (name, color))| {
                // seat < MAX_PLAYERS
                Player::new(PlayerId(seat as u8), name.as_ref().trim(), color)
            })
            .collect();
        info!(player_count, "New game");
        Ok(Self {
            state: GameState::new(players),
            dice: Box::new(dice),
            sinks: Vec::new(),
            recorders: Vec::new(),
        })
    }

    /// Starts a game with dice seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` for an invalid count or name list.
    pub fn with_random_dice<S: AsRef<str>>(
        player_count: usize,
        names: &[S],
    ) -> Result<Self, SetupError> {
        Self::new_game(player_count, names, RandomDice::from_entropy())
    }

    /// Adds a subscriber for every event committed from now on.
    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Adds a recorder told the winner's name when the game ends.
    pub fn record_wins_to(&mut self, recorder: impl WinRecorder + 'static) {
        self.recorders.push(Box::new(recorder));
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the live state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns an owned copy of the state for rendering.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Returns the seat whose turn it is.
    pub fn current_player(&self) -> PlayerId {
        self.state.current()
    }

    /// Returns the turn phase.
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    /// Returns the most recent roll.
    pub fn last_roll(&self) -> Option<DieFace> {
        self.state.last_roll()
    }

    /// Returns the winning seat once the game has ended.
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    /// Returns the tokens the current player may move for the pending roll.
    pub fn legal_tokens(&self) -> Vec<TokenId> {
        self.state.legal_tokens()
    }

    /// Returns true if a roll is pending and some token can use it.
    pub fn has_legal_move(&self) -> bool {
        !self.state.legal_tokens().is_empty()
    }

    /// Returns how many of a seat's tokens wait in base.
    pub fn tokens_in_base(&self, player: PlayerId) -> Option<usize> {
        self.state.player(player).map(Player::tokens_in_base)
    }

    // ─────────────────────────────────────────────────────────────
    //  Actions
    // ─────────────────────────────────────────────────────────────

    /// Applies any action.
    ///
    /// # Errors
    ///
    /// Returns the same rejections as [`roll`](Self::roll) and
    /// [`select_token`](Self::select_token).
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, TurnError> {
        match action {
            Action::Roll { player } => self
                .roll(player)
                .map(|outcome| ActionOutcome::Rolled { outcome }),
            Action::Select { player, token } => self
                .select_token(player, token)
                .map(|outcome| ActionOutcome::Moved { outcome }),
        }
    }

    /// Rolls the die for `player`.
    ///
    /// If nothing can move, the turn passes immediately and the outcome says
    /// so; any pause before showing that is up to the caller.
    ///
    /// # Errors
    ///
    /// `GameAlreadyEnded`, `NotCurrentPlayer` or `RollNotAllowedNow`.
    #[instrument(skip(self), fields(player = %player))]
    pub fn roll(&mut self, player: PlayerId) -> Result<RollOutcome, TurnError> {
        let action = Action::Roll { player };
        RollContract::pre(&self.state, &action).inspect_err(|err| warn!(%err, "Roll rejected"))?;

        let face = self.dice.next_face();
        let mut next = self.state.clone();
        next.set_last_roll(face);
        let mut events = vec![GameEvent::Rolled { player, face }];

        let legal = next
            .current_player()
            .map(|p| p.legal_tokens(face))
            .unwrap_or_default();
        let outcome = if legal.is_empty() {
            events.push(GameEvent::NoLegalMove { player, face });
            let to = next.pass_turn();
            events.push(GameEvent::TurnChanged { from: player, to });
            RollOutcome::NoLegalMove { face, next: to }
        } else {
            next.set_phase(TurnPhase::AwaitingMoveSelection { roll: face });
            RollOutcome::MustSelect { face, legal }
        };

        RollContract::post(&self.state, &next)?;
        info!(%face, legal = outcome.legal().len(), "Rolled");
        self.commit(next, events);
        Ok(outcome)
    }

    /// Moves `token` by the pending roll on behalf of `player`.
    ///
    /// # Errors
    ///
    /// `GameAlreadyEnded`, `NotCurrentPlayer`, `NoPriorRoll` or
    /// `TokenNotSelectable`.
    #[instrument(skip(self), fields(player = %player, token = %token))]
    pub fn select_token(&mut self, player: PlayerId, token: TokenId) -> Result<MoveOutcome, TurnError> {
        let action = Action::Select { player, token };
        SelectContract::pre(&self.state, &action)
            .inspect_err(|err| warn!(%err, "Selection rejected"))?;
        let roll = self
            .state
            .phase()
            .pending_roll()
            .ok_or(TurnError::NoPriorRoll)?;

        let mut next = self.state.clone();
        let mut events = Vec::new();
        let mover = next
            .player(player)
            .map(Player::color)
            .ok_or(TurnError::TokenNotSelectable(token))?;

        let piece = next
            .players_mut()
            .get_mut(player.index())
            .and_then(|p| p.token_mut(token))
            .ok_or(TurnError::TokenNotSelectable(token))?;
        let (movement, landing) = if piece.is_in_base() {
            let landing = piece.leave_base()?;
            let to = path::entry_cell(mover);
            events.push(GameEvent::TokenLeftBase { token, cell: to });
            (Movement::LeftBase { to }, landing)
        } else {
            let from = piece.cell().ok_or(TurnError::TokenNotSelectable(token))?;
            let landing = piece.advance(roll)?;
            match landing.cell() {
                Some(to) => {
                    events.push(GameEvent::TokenMoved { token, from, to });
                    (Movement::Moved { from, to: landing }, landing)
                }
                None => {
                    events.push(GameEvent::TokenFinished { token });
                    (Movement::Finished { from }, landing)
                }
            }
        };

        let captured = capture::resolve_capture(next.players_mut(), landing, mover);
        if !captured.is_empty()
            && let Some(cell) = landing.cell()
        {
            events.push(GameEvent::TokenCaptured {
                by: token,
                tokens: captured.clone(),
                cell,
            });
        }

        let winner = next
            .player(player)
            .filter(|p| matches!(movement, Movement::Finished { .. }) && win::has_won(p))
            .map(|p| p.name().to_string());
        let resolution = if let Some(name) = winner {
            next.set_phase(TurnPhase::Ended { winner: player });
            events.push(GameEvent::GameOver {
                winner: player,
                name,
            });
            TurnResolution::GameOver { winner: player }
        } else if let Some(reason) = turn::extra_turn(roll, !captured.is_empty()) {
            next.set_phase(TurnPhase::AwaitingRoll);
            events.push(GameEvent::ExtraTurn { player, reason });
            TurnResolution::Continue { reason }
        } else {
            let to = next.pass_turn();
            events.push(GameEvent::TurnChanged { from: player, to });
            TurnResolution::Pass { next: to }
        };

        SelectContract::post(&self.state, &next)?;
        info!(?movement, captured = captured.len(), ?resolution, "Token moved");
        self.commit(next, events);
        Ok(MoveOutcome {
            token,
            movement,
            captured,
            resolution,
        })
    }

    fn commit(&mut self, next: GameState, events: Vec<GameEvent>) {
        self.state = next;
        for event in &events {
            debug!(?event, "Publishing event");
            for sink in &mut self.sinks {
                sink.publish(event);
            }
            if let GameEvent::GameOver { winner, name } = event {
                info!(%winner, name = %name, "Game over");
                for recorder in &mut self.recorders {
                    recorder.record_win(name);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("sinks", &self.sinks.len())
            .field("recorders", &self.recorders.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::scoreboard::Scoreboard;
    use crate::turn::ExtraTurn;
    use crate::types::Cell;
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};

    fn game(players: usize, script: &[u8]) -> GameSession {
        let names = ["Ravi", "Asha", "Bela", "Dev"];
        GameSession::new_game(players, &names[..players], ScriptedDice::new(script).unwrap()).unwrap()
    }

    fn tid(player: u8, slot: u8) -> TokenId {
        TokenId::new(PlayerId(player), slot)
    }

    fn place(session: &mut GameSession, token: TokenId, step: u8) {
        session.state_mut().players_mut()[token.player.index()]
            .token_mut(token)
            .unwrap()
            .place_at(step);
    }

    #[test]
    fn test_setup_validation() {
        let dice = || ScriptedDice::new(&[1]).unwrap();
        assert_eq!(
            GameSession::new_game(1, &["A"], dice()).unwrap_err(),
            SetupError::PlayerCount(1)
        );
        assert_eq!(
            GameSession::new_game(5, &["A", "B", "C", "D", "E"], dice()).unwrap_err(),
            SetupError::PlayerCount(5)
        );
        assert_eq!(
            GameSession::new_game(3, &["A", "B"], dice()).unwrap_err(),
            SetupError::NameCount { expected: 3, got: 2 }
        );
        assert_eq!(
            GameSession::new_game(2, &["A", "  "], dice()).unwrap_err(),
            SetupError::BlankName(1)
        );
    }

    #[test]
    fn test_roll_six_and_leave_base() {
        let mut session = game(4, &[6]);
        let rolled = session.roll(PlayerId(0)).unwrap();
        assert_eq!(rolled.face(), DieFace::SIX);
        assert_eq!(rolled.legal().len(), 4);

        let moved = session.select_token(PlayerId(0), tid(0, 0)).unwrap();
        assert_eq!(moved.movement, Movement::LeftBase { to: Cell::new(6, 1) });
        assert_eq!(
            moved.resolution,
            TurnResolution::Continue { reason: ExtraTurn::RolledSix }
        );
        let token = &session.state().players()[0].tokens()[0];
        assert_eq!(token.position(), Some(0));
        assert_eq!(token.cell(), Some(path::COMMON_PATH[0]));
        assert_eq!(session.current_player(), PlayerId(0));
        assert_eq!(session.phase(), TurnPhase::AwaitingRoll);
        assert_eq!(session.tokens_in_base(PlayerId(0)), Some(3));
    }

    #[test]
    fn test_no_legal_move_passes_turn() {
        let mut session = game(3, &[4]);
        let rolled = session.roll(PlayerId(0)).unwrap();
        assert_eq!(
            rolled,
            RollOutcome::NoLegalMove {
                face: DieFace::try_from(4).unwrap(),
                next: PlayerId(1),
            }
        );
        assert_eq!(session.current_player(), PlayerId(1));
        assert_eq!(session.phase(), TurnPhase::AwaitingRoll);
    }

    #[test]
    fn test_overshoot_passes_turn_without_moving() {
        let mut session = game(2, &[5]);
        place(&mut session, tid(0, 0), 53);
        let rolled = session.roll(PlayerId(0)).unwrap();
        assert!(matches!(rolled, RollOutcome::NoLegalMove { next: PlayerId(1), .. }));
        assert_eq!(session.state().players()[0].tokens()[0].position(), Some(53));
    }

    #[test]
    fn test_overshoot_with_six_still_passes() {
        let mut session = game(2, &[6]);
        for slot in 0..3 {
            place(&mut session, tid(0, slot), 56);
        }
        place(&mut session, tid(0, 3), 53);
        let rolled = session.roll(PlayerId(0)).unwrap();
        assert!(matches!(rolled, RollOutcome::NoLegalMove { next: PlayerId(1), .. }));
        assert_eq!(session.current_player(), PlayerId(1));
    }

    #[test]
    fn test_blocked_token_not_selectable_while_others_move() {
        let mut session = game(2, &[5]);
        place(&mut session, tid(0, 0), 53);
        place(&mut session, tid(0, 1), 10);
        let rolled = session.roll(PlayerId(0)).unwrap();
        assert_eq!(rolled.legal(), &[tid(0, 1)]);

        let before = session.snapshot();
        assert_eq!(
            session.select_token(PlayerId(0), tid(0, 0)),
            Err(TurnError::TokenNotSelectable(tid(0, 0)))
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_base_token_needs_six_to_be_selected() {
        let mut session = game(2, &[6, 3]);
        session.roll(PlayerId(0)).unwrap();
        session.select_token(PlayerId(0), tid(0, 0)).unwrap();
        session.roll(PlayerId(0)).unwrap();

        let before = session.snapshot();
        assert_eq!(
            session.select_token(PlayerId(0), tid(0, 1)),
            Err(TurnError::TokenNotSelectable(tid(0, 1)))
        );
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.tokens_in_base(PlayerId(0)), Some(3));
    }

    #[test]
    fn test_finished_token_not_selectable() {
        let mut session = game(2, &[2]);
        place(&mut session, tid(0, 0), 56);
        place(&mut session, tid(0, 1), 20);
        session.roll(PlayerId(0)).unwrap();
        assert_eq!(session.legal_tokens(), vec![tid(0, 1)]);

        let before = session.snapshot();
        assert_eq!(
            session.select_token(PlayerId(0), tid(0, 0)),
            Err(TurnError::TokenNotSelectable(tid(0, 0)))
        );
        assert_eq!(session.snapshot(), before);
        assert!(session.state().players()[0].tokens()[0].is_finished());
    }

    #[test]
    fn test_random_dice_session_plays() {
        let mut session = GameSession::with_random_dice(3, &["Ravi", "Asha", "Bela"]).unwrap();
        assert_eq!(session.state().player_count(), 3);
        session.roll(PlayerId(0)).unwrap();
        assert!(session.last_roll().is_some());
        assert_eq!(
            GameSession::with_random_dice(5, &["A", "B", "C", "D", "E"]).unwrap_err(),
            SetupError::PlayerCount(5)
        );
    }

    #[test]
    fn test_capture_grants_extra_turn() {
        let mut session = game(2, &[4]);
        // Green step 5 is track index 18, a plain cell
        place(&mut session, tid(1, 0), 5);
        place(&mut session, tid(0, 0), 14);

        session.roll(PlayerId(0)).unwrap();
        let moved = session.select_token(PlayerId(0), tid(0, 0)).unwrap();
        assert_eq!(moved.captured, vec![tid(1, 0)]);
        assert_eq!(moved.extra_turn(), Some(ExtraTurn::Capture));
        assert_eq!(session.current_player(), PlayerId(0));
        assert!(session.state().players()[1].tokens()[0].is_in_base());
    }

    #[test]
    fn test_capture_with_six_is_one_extra_turn() {
        let mut session = game(2, &[6, 1]);
        place(&mut session, tid(1, 0), 5);
        place(&mut session, tid(0, 0), 12);

        session.roll(PlayerId(0)).unwrap();
        let moved = session.select_token(PlayerId(0), tid(0, 0)).unwrap();
        assert_eq!(moved.extra_turn(), Some(ExtraTurn::RolledSixAndCapture));

        session.roll(PlayerId(0)).unwrap();
        let moved = session.select_token(PlayerId(0), tid(0, 0)).unwrap();
        assert_eq!(moved.resolution, TurnResolution::Pass { next: PlayerId(1) });
    }

    #[test]
    fn test_no_capture_on_safe_cell() {
        let mut session = game(2, &[2]);
        // Green entry cell (index 13) is safe; red reaches it at step 13
        place(&mut session, tid(1, 0), 0);
        place(&mut session, tid(0, 0), 11);

        session.roll(PlayerId(0)).unwrap();
        let moved = session.select_token(PlayerId(0), tid(0, 0)).unwrap();
        assert!(!moved.is_capture());
        assert_eq!(moved.resolution, TurnResolution::Pass { next: PlayerId(1) });
        assert_eq!(session.state().players()[1].tokens()[0].position(), Some(0));
    }

    #[test]
    fn test_finish_with_six_continues() {
        let mut session = game(2, &[6]);
        place(&mut session, tid(0, 0), 50);
        session.roll(PlayerId(0)).unwrap();
        let moved = session.select_token(PlayerId(0), tid(0, 0)).unwrap();
        assert_eq!(moved.movement, Movement::Finished { from: Cell::new(7, 0) });
        assert_eq!(moved.extra_turn(), Some(ExtraTurn::RolledSix));
        assert!(session.state().players()[0].tokens()[0].is_finished());
    }

    #[test]
    fn test_win_ends_game_once() {
        let mut session = game(2, &[3]);
        let (tx, rx) = mpsc::channel();
        session.subscribe(tx);
        let board = Arc::new(Mutex::new(Scoreboard::new()));
        session.record_wins_to(Arc::clone(&board));

        for slot in 0..3 {
            place(&mut session, tid(0, slot), 56);
        }
        place(&mut session, tid(0, 3), 53);

        session.roll(PlayerId(0)).unwrap();
        let moved = session.select_token(PlayerId(0), tid(0, 3)).unwrap();
        assert_eq!(moved.resolution, TurnResolution::GameOver { winner: PlayerId(0) });
        assert_eq!(session.winner(), Some(PlayerId(0)));

        let before = session.snapshot();
        assert_eq!(session.roll(PlayerId(0)), Err(TurnError::GameAlreadyEnded));
        assert_eq!(session.roll(PlayerId(1)), Err(TurnError::GameAlreadyEnded));
        assert_eq!(
            session.select_token(PlayerId(0), tid(0, 3)),
            Err(TurnError::GameAlreadyEnded)
        );
        assert_eq!(session.snapshot(), before);

        let game_overs = rx
            .try_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(board.lock().unwrap().wins("Ravi"), 1);
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut session = game(2, &[6]);
        let before = session.snapshot();

        assert_eq!(
            session.roll(PlayerId(1)),
            Err(TurnError::NotCurrentPlayer {
                attempted: PlayerId(1),
                current: PlayerId(0),
            })
        );
        assert_eq!(
            session.select_token(PlayerId(0), tid(0, 0)),
            Err(TurnError::NoPriorRoll)
        );
        assert_eq!(session.snapshot(), before);

        session.roll(PlayerId(0)).unwrap();
        let rolled = session.snapshot();
        assert_eq!(session.roll(PlayerId(0)), Err(TurnError::RollNotAllowedNow));
        assert_eq!(
            session.select_token(PlayerId(1), tid(1, 0)),
            Err(TurnError::NotCurrentPlayer {
                attempted: PlayerId(1),
                current: PlayerId(0),
            })
        );
        assert_eq!(
            session.select_token(PlayerId(0), tid(1, 0)),
            Err(TurnError::TokenNotSelectable(tid(1, 0)))
        );
        assert_eq!(session.snapshot(), rolled);
    }

    #[test]
    fn test_event_order_for_plain_move() {
        let mut session = game(2, &[3]);
        let (tx, rx) = mpsc::channel();
        session.subscribe(tx);
        place(&mut session, tid(0, 0), 2);

        session.roll(PlayerId(0)).unwrap();
        session.select_token(PlayerId(0), tid(0, 0)).unwrap();

        let face = DieFace::try_from(3).unwrap();
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                GameEvent::Rolled { player: PlayerId(0), face },
                GameEvent::TokenMoved {
                    token: tid(0, 0),
                    from: Cell::new(6, 3),
                    to: Cell::new(5, 6),
                },
                GameEvent::TurnChanged { from: PlayerId(0), to: PlayerId(1) },
            ]
        );
    }

    #[test]
    fn test_apply_dispatches_actions() {
        let mut session = game(2, &[6]);
        let rolled = session.apply(Action::Roll { player: PlayerId(0) }).unwrap();
        assert!(matches!(rolled, ActionOutcome::Rolled { .. }));
        let moved = session
            .apply(Action::Select { player: PlayerId(0), token: tid(0, 2) })
            .unwrap();
        assert!(matches!(moved, ActionOutcome::Moved { .. }));
        assert_eq!(session.state().players()[0].tokens()[2].position(), Some(0));
    }
}
