//! Complete game state.
//!
//! `GameState` is plain data: the seated players, whose turn it is, the turn
//! phase and the last roll. Sessions mutate a clone and commit it only after
//! the post-conditions hold, so a clone doubles as the immutable snapshot
//! handed to renderers.

use crate::phases::TurnPhase;
use crate::player::Player;
use crate::turn;
use crate::types::{DieFace, PlayerId, TokenId};
use serde::{Deserialize, Serialize};

/// Snapshot of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    players: Vec<Player>,
    current: PlayerId,
    phase: TurnPhase,
    last_roll: Option<DieFace>,
}

impl GameState {
    pub(crate) fn new(players: Vec<Player>) -> Self {
        Self {
            players,
            current: PlayerId(0),
            phase: TurnPhase::AwaitingRoll,
            last_roll: None,
        }
    }

    /// Returns the seated players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the player in the given seat.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Returns the number of seats.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns the seat whose turn it is.
    pub fn current(&self) -> PlayerId {
        self.current
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.current)
    }

    /// Returns the turn phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Returns the most recent roll in this game.
    pub fn last_roll(&self) -> Option<DieFace> {
        self.last_roll
    }

    /// Returns true once the current player has rolled this turn.
    pub fn has_rolled(&self) -> bool {
        self.phase.pending_roll().is_some()
    }

    /// Returns the winning seat once the game has ended.
    pub fn winner(&self) -> Option<PlayerId> {
        self.phase.winner()
    }

    /// Returns the tokens the current player may move for the pending roll.
    ///
    /// Empty outside `AwaitingMoveSelection`.
    pub fn legal_tokens(&self) -> Vec<TokenId> {
        match (self.phase.pending_roll(), self.current_player()) {
            (Some(roll), Some(player)) => player.legal_tokens(roll),
            _ => Vec::new(),
        }
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_last_roll(&mut self, roll: DieFace) {
        self.last_roll = Some(roll);
    }

    /// Hands the turn to the next seat and returns it.
    pub(crate) fn pass_turn(&mut self) -> PlayerId {
        self.current = turn::next_player(self.current, self.players.len());
        self.phase = TurnPhase::AwaitingRoll;
        self.current
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, current: PlayerId) {
        self.current = current;
    }
}
