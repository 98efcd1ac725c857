//! Contract-based validation for Chausar actions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! Preconditions run before anything changes, so a failed one leaves the
//! session untouched. Postconditions run against the candidate state before
//! it is committed.

use crate::action::Action;
use crate::error::TurnError;
use crate::invariants::{ChausarInvariants, InvariantSet};
use crate::phases::TurnPhase;
use crate::state::GameState;
use crate::types::{PlayerId, TokenId};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), TurnError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), TurnError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: no one has won yet.
pub struct GameNotEnded;

impl GameNotEnded {
    /// Rejects every action once the game has ended.
    pub fn check(state: &GameState) -> Result<(), TurnError> {
        if state.phase().is_ended() {
            Err(TurnError::GameAlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the action comes from the seat whose turn it is.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects actions from any other seat.
    pub fn check(state: &GameState, player: PlayerId) -> Result<(), TurnError> {
        if player != state.current() {
            Err(TurnError::NotCurrentPlayer {
                attempted: player,
                current: state.current(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: the token is in the legal set for the pending roll.
///
/// Covers wrong owner, base without a six, overshoot and finished tokens.
pub struct TokenSelectable;

impl TokenSelectable {
    /// Rejects tokens that cannot move now.
    pub fn check(state: &GameState, token: TokenId) -> Result<(), TurnError> {
        if state.legal_tokens().contains(&token) {
            Ok(())
        } else {
            Err(TurnError::TokenNotSelectable(token))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Postconditions
// ─────────────────────────────────────────────────────────────

/// Transition check: finished tokens stay finished.
pub struct FinishedNeverRegress;

impl FinishedNeverRegress {
    /// Returns true if every token finished in `before` is finished in `after`.
    pub fn holds(before: &GameState, after: &GameState) -> bool {
        before
            .players()
            .iter()
            .zip(after.players())
            .all(|(was, now)| {
                was.tokens()
                    .iter()
                    .zip(now.tokens())
                    .all(|(a, b)| !a.is_finished() || b.is_finished())
            })
    }
}

fn check_transition(before: &GameState, after: &GameState) -> Result<(), TurnError> {
    let mut descriptions = match ChausarInvariants::check_all(after) {
        Ok(()) => Vec::new(),
        Err(violations) => violations.into_iter().map(|v| v.description).collect(),
    };
    if before.player_count() != after.player_count() {
        descriptions.push("Seats never change during a game".to_string());
    }
    if !FinishedNeverRegress::holds(before, after) {
        descriptions.push("Finished tokens never move again".to_string());
    }
    if descriptions.is_empty() {
        Ok(())
    } else {
        let joined = descriptions.join("; ");
        warn!(violations = %joined, "Postcondition failed");
        Err(TurnError::InvariantViolation(format!(
            "Postcondition failed: {}",
            joined
        )))
    }
}

// ─────────────────────────────────────────────────────────────
//  Action Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for rolling.
///
/// Preconditions, in order: game not ended, actor is current, no roll taken.
pub struct RollContract;

impl Contract<GameState, Action> for RollContract {
    #[instrument(skip(state))]
    fn pre(state: &GameState, action: &Action) -> Result<(), TurnError> {
        GameNotEnded::check(state)?;
        PlayersTurn::check(state, action.player())?;
        match state.phase() {
            TurnPhase::AwaitingRoll => Ok(()),
            TurnPhase::AwaitingMoveSelection { .. } => Err(TurnError::RollNotAllowedNow),
            TurnPhase::Ended { .. } => Err(TurnError::GameAlreadyEnded),
        }
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), TurnError> {
        check_transition(before, after)
    }
}

/// Contract for selecting a token.
///
/// Preconditions, in order: game not ended, actor is current, a roll is
/// pending, token is in the legal set.
pub struct SelectContract;

impl Contract<GameState, Action> for SelectContract {
    #[instrument(skip(state))]
    fn pre(state: &GameState, action: &Action) -> Result<(), TurnError> {
        GameNotEnded::check(state)?;
        PlayersTurn::check(state, action.player())?;
        if !state.has_rolled() {
            return Err(TurnError::NoPriorRoll);
        }
        match action {
            Action::Select { token, .. } => TokenSelectable::check(state, *token),
            Action::Roll { .. } => Err(TurnError::RollNotAllowedNow),
        }
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), TurnError> {
        check_transition(before, after)
    }
}
