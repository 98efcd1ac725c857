//! First-class action types.
//!
//! Actions are domain events, not side effects. They carry the acting seat so
//! they can be validated against the turn before anything changes.

use crate::types::{PlayerId, TokenId};
use serde::{Deserialize, Serialize};

/// A request from a seat to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Roll the die.
    Roll {
        /// Seat asking to roll.
        player: PlayerId,
    },
    /// Move one token by the pending roll.
    Select {
        /// Seat asking to move.
        player: PlayerId,
        /// Token to move.
        token: TokenId,
    },
}

impl Action {
    /// Returns the acting seat.
    pub fn player(&self) -> PlayerId {
        match self {
            Action::Roll { player } | Action::Select { player, .. } => *player,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Roll { player } => write!(f, "player {} rolls", player),
            Action::Select { player, token } => write!(f, "player {} moves {}", player, token),
        }
    }
}
