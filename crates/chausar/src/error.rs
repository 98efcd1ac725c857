//! Error types for the Chausar engine.
//!
//! Every [`TurnError`] is a recoverable rejection: the session that produced
//! it is left exactly as it was before the call.

use crate::types::{PlayerId, TokenId};
use derive_more::{Display, Error};
use tracing::instrument;

/// Reason an engine call was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TurnError {
    /// The call was attributed to a player whose turn it is not.
    #[display("It's not player {}'s turn (player {} to act)", attempted, current)]
    NotCurrentPlayer {
        /// Player named in the call.
        attempted: PlayerId,
        /// Player whose turn it is.
        current: PlayerId,
    },

    /// A roll was requested after this turn's roll was already taken.
    #[display("Roll not allowed now: a token must be selected first")]
    RollNotAllowedNow,

    /// A token was selected before rolling.
    #[display("Roll the dice first")]
    NoPriorRoll,

    /// The token has no legal move for the current roll.
    #[display("Token {} cannot move this turn", _0)]
    TokenNotSelectable(#[error(not(source))] TokenId),

    /// The game already has a winner.
    #[display("Game is already over")]
    GameAlreadyEnded,

    /// A post-condition failed; the candidate state was discarded.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

/// Reason a game could not be set up.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SetupError {
    /// Player count outside `2..=4`.
    #[display("Player count must be between 2 and 4, got {}", _0)]
    PlayerCount(#[error(not(source))] usize),

    /// Number of names does not match the player count.
    #[display("Expected {} player names, got {}", expected, got)]
    NameCount {
        /// Configured player count.
        expected: usize,
        /// Names supplied.
        got: usize,
    },

    /// A player name was empty or whitespace.
    #[display("Player {} has a blank name", _0)]
    BlankName(#[error(not(source))] usize),
}

/// Invalid die input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DiceError {
    /// A face outside `1..=6`.
    #[display("Die face must be 1-6, got {}", _0)]
    FaceOutOfRange(#[error(not(source))] u8),

    /// A scripted die with nothing to roll.
    #[display("Dice script is empty")]
    EmptyScript,
}

/// Configuration loading error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<SetupError> for ConfigError {
    #[track_caller]
    fn from(err: SetupError) -> Self {
        Self::new(format!("Invalid game setup: {}", err))
    }
}
