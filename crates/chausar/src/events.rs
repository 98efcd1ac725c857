//! Events pushed to the rendering layer, and the outcomes returned to callers.

use crate::path::Landing;
use crate::turn::{ExtraTurn, TurnResolution};
use crate::types::{Cell, DieFace, PlayerId, TokenId};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use tracing::debug;

/// Something that happened in the game, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A seat rolled the die.
    Rolled {
        /// Seat that rolled.
        player: PlayerId,
        /// Face shown.
        face: DieFace,
    },
    /// The roll gave the seat nothing to move; the turn passes.
    NoLegalMove {
        /// Seat that rolled.
        player: PlayerId,
        /// Face shown.
        face: DieFace,
    },
    /// A token entered the track.
    TokenLeftBase {
        /// Token that entered.
        token: TokenId,
        /// Entry cell.
        cell: Cell,
    },
    /// A token moved between two cells.
    TokenMoved {
        /// Token that moved.
        token: TokenId,
        /// Cell it left.
        from: Cell,
        /// Cell it reached.
        to: Cell,
    },
    /// Opposing tokens were sent back to base.
    TokenCaptured {
        /// Token whose landing caused the capture.
        by: TokenId,
        /// Evicted tokens.
        tokens: Vec<TokenId>,
        /// Cell where it happened.
        cell: Cell,
    },
    /// A token reached the finish.
    TokenFinished {
        /// Token that finished.
        token: TokenId,
    },
    /// The mover rolls again.
    ExtraTurn {
        /// Seat keeping the turn.
        player: PlayerId,
        /// Why.
        reason: ExtraTurn,
    },
    /// Play passed to another seat.
    TurnChanged {
        /// Seat whose turn ended.
        from: PlayerId,
        /// Seat now to act.
        to: PlayerId,
    },
    /// A seat finished all four tokens. Emitted once per game.
    GameOver {
        /// Winning seat.
        winner: PlayerId,
        /// Winner's name.
        name: String,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rolled { player, face } => write!(f, "player {} rolled {}", player, face),
            Self::NoLegalMove { player, face } => {
                write!(f, "player {} has no move for {}", player, face)
            }
            Self::TokenLeftBase { token, cell } => write!(f, "{} entered at {}", token, cell),
            Self::TokenMoved { token, from, to } => write!(f, "{} {} -> {}", token, from, to),
            Self::TokenCaptured { by, tokens, cell } => {
                write!(f, "{} captured", by)?;
                for token in tokens {
                    write!(f, " {}", token)?;
                }
                write!(f, " at {}", cell)
            }
            Self::TokenFinished { token } => write!(f, "{} finished", token),
            Self::ExtraTurn { player, reason } => {
                write!(f, "player {} rolls again ({})", player, reason)
            }
            Self::TurnChanged { from, to } => write!(f, "turn {} -> {}", from, to),
            Self::GameOver { winner, name } => write!(f, "{} (player {}) wins", name, winner),
        }
    }
}

/// Receives events as the engine commits them.
pub trait EventSink: Send {
    /// Handles one event.
    fn publish(&mut self, event: &GameEvent);
}

impl EventSink for Sender<GameEvent> {
    fn publish(&mut self, event: &GameEvent) {
        if self.send(event.clone()).is_err() {
            debug!("Event receiver dropped");
        }
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F> EventSink for FnSink<F>
where
    F: FnMut(&GameEvent) + Send,
{
    fn publish(&mut self, event: &GameEvent) {
        (self.0)(event)
    }
}

/// Result of an accepted roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RollOutcome {
    /// The seat must now select one of `legal`.
    MustSelect {
        /// Face shown.
        face: DieFace,
        /// Tokens that may move, in slot order.
        legal: Vec<TokenId>,
    },
    /// Nothing could move; the turn already passed to `next`.
    NoLegalMove {
        /// Face shown.
        face: DieFace,
        /// Seat now to act.
        next: PlayerId,
    },
}

impl RollOutcome {
    /// Returns the face rolled.
    pub fn face(&self) -> DieFace {
        match self {
            RollOutcome::MustSelect { face, .. } | RollOutcome::NoLegalMove { face, .. } => *face,
        }
    }

    /// Returns the tokens that may move (empty when the turn passed).
    pub fn legal(&self) -> &[TokenId] {
        match self {
            RollOutcome::MustSelect { legal, .. } => legal,
            RollOutcome::NoLegalMove { .. } => &[],
        }
    }
}

/// How the selected token moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "movement", rename_all = "snake_case")]
pub enum Movement {
    /// Left base onto its entry cell.
    LeftBase {
        /// Entry cell.
        to: Cell,
    },
    /// Moved along its path.
    Moved {
        /// Cell it left.
        from: Cell,
        /// Where it landed.
        to: Landing,
    },
    /// Reached the finish from `from`.
    Finished {
        /// Cell it left.
        from: Cell,
    },
}

/// Result of an accepted token selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Token that moved.
    pub token: TokenId,
    /// How it moved.
    pub movement: Movement,
    /// Opposing tokens sent back to base.
    pub captured: Vec<TokenId>,
    /// How the turn ended.
    pub resolution: TurnResolution,
}

impl MoveOutcome {
    /// Returns true if the move captured anything.
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Returns the extra-turn reason, if the mover keeps the turn.
    pub fn extra_turn(&self) -> Option<ExtraTurn> {
        match self.resolution {
            TurnResolution::Continue { reason } => Some(reason),
            TurnResolution::Pass { .. } | TurnResolution::GameOver { .. } => None,
        }
    }
}

/// Result of applying any [`Action`](crate::Action).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A roll was taken.
    Rolled {
        /// The roll result.
        outcome: RollOutcome,
    },
    /// A token was moved.
    Moved {
        /// The move result.
        outcome: MoveOutcome,
    },
}
