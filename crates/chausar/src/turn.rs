//! Turn resolution rules.
//!
//! After a move the mover keeps the turn on a six or a capture. Both together
//! still grant a single extra roll. A turn with no legal move always passes.

use crate::types::{DieFace, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Why the mover keeps the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExtraTurn {
    /// The roll was a six.
    RolledSix,
    /// The move captured at least one token.
    Capture,
    /// Both; still only one extra roll.
    RolledSixAndCapture,
}

/// How a resolved move or roll ends the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "resolution", rename_all = "snake_case")]
pub enum TurnResolution {
    /// Same player rolls again.
    Continue {
        /// What earned the extra roll.
        reason: ExtraTurn,
    },
    /// Turn moved to the next seat.
    Pass {
        /// Seat now to act.
        next: PlayerId,
    },
    /// The mover won.
    GameOver {
        /// Winning seat.
        winner: PlayerId,
    },
}

/// Decides whether a completed move earns an extra roll.
#[instrument]
pub fn extra_turn(roll: DieFace, captured: bool) -> Option<ExtraTurn> {
    match (roll.is_six(), captured) {
        (true, true) => Some(ExtraTurn::RolledSixAndCapture),
        (true, false) => Some(ExtraTurn::RolledSix),
        (false, true) => Some(ExtraTurn::Capture),
        (false, false) => None,
    }
}

/// Returns the seat after `current` in a game of `player_count` seats.
pub fn next_player(current: PlayerId, player_count: usize) -> PlayerId {
    let next = (current.index() + 1) % player_count.max(1);
    // player_count never exceeds MAX_PLAYERS
    PlayerId(next as u8)
}
