//! Turn phases.
//!
//! A turn cycles `AwaitingRoll → AwaitingMoveSelection → AwaitingRoll` until
//! some player wins, after which the session sits in `Ended` for good.

use crate::types::{DieFace, PlayerId};
use serde::{Deserialize, Serialize};

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TurnPhase {
    /// The current player must roll.
    AwaitingRoll,
    /// The current player rolled and must pick one of the legal tokens.
    AwaitingMoveSelection {
        /// This turn's roll.
        roll: DieFace,
    },
    /// A player has won. Terminal.
    Ended {
        /// The winning seat.
        winner: PlayerId,
    },
}

impl TurnPhase {
    /// Returns the pending roll while a selection is awaited.
    pub fn pending_roll(&self) -> Option<DieFace> {
        match self {
            TurnPhase::AwaitingMoveSelection { roll } => Some(*roll),
            TurnPhase::AwaitingRoll | TurnPhase::Ended { .. } => None,
        }
    }

    /// Returns the winner once the game has ended.
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            TurnPhase::Ended { winner } => Some(*winner),
            TurnPhase::AwaitingRoll | TurnPhase::AwaitingMoveSelection { .. } => None,
        }
    }

    /// Returns true once the game has ended.
    pub fn is_ended(&self) -> bool {
        matches!(self, TurnPhase::Ended { .. })
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnPhase::AwaitingRoll => write!(f, "awaiting roll"),
            TurnPhase::AwaitingMoveSelection { roll } => {
                write!(f, "awaiting token selection (rolled {})", roll)
            }
            TurnPhase::Ended { winner } => write!(f, "ended, player {} won", winner),
        }
    }
}
