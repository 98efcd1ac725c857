//! Chausar rules engine.
//!
//! Chausar is a four-seat cross-and-circle race game: each seat walks four
//! tokens out of base on a six, around a shared 52-cell track and up a private
//! home stretch, capturing opponents on unsafe cells along the way. This crate
//! is the rules engine only. Rendering, input and score storage are the
//! host's business; the engine reports to them through events.
//!
//! # Architecture
//!
//! - **Path**: static board geometry (track, entry points, home stretches, safe cells)
//! - **Token**: the `Base → OnTrack → Finished` state machine
//! - **Capture**: eviction of opponents on landing
//! - **Turn**: extra-turn and pass rules
//! - **Win**: completion check
//! - **Session**: the owned root that sequences rolls and selections,
//!   validated by contracts and invariants
//!
//! # Example
//!
//! ```
//! use chausar::{GameSession, PlayerId, RollOutcome, ScriptedDice};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dice = ScriptedDice::new(&[6])?;
//! let mut game = GameSession::new_game(2, &["Ravi", "Asha"], dice)?;
//!
//! if let RollOutcome::MustSelect { legal, .. } = game.roll(PlayerId(0))? {
//!     game.select_token(PlayerId(0), legal[0])?;
//! }
//! assert_eq!(game.current_player(), PlayerId(0)); // a six rolls again
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod capture;
mod config;
mod contracts;
mod dice;
mod error;
mod events;
pub mod invariants;
pub mod path;
mod phases;
mod player;
mod scoreboard;
mod session;
mod state;
mod token;
mod turn;
mod types;
mod win;

// Crate-level exports - Domain types
pub use types::{
    Cell, Color, DieFace, MAX_PLAYERS, MIN_PLAYERS, PlayerId, TOKENS_PER_PLAYER, TokenId,
};

// Crate-level exports - Path model
pub use path::{Landing, cell_at, is_safe};

// Crate-level exports - Token state machine
pub use player::Player;
pub use token::{Token, TokenState};

// Crate-level exports - Capture, turn and win rules
pub use capture::captures_at;
pub use turn::{ExtraTurn, TurnResolution, extra_turn, next_player};
pub use win::{find_winner, has_won};

// Crate-level exports - Session
pub use action::Action;
pub use phases::TurnPhase;
pub use session::{GameSession, validate_setup};
pub use state::GameState;

// Crate-level exports - Events
pub use events::{
    ActionOutcome, EventSink, FnSink, GameEvent, MoveOutcome, Movement, RollOutcome,
};

// Crate-level exports - Contracts
pub use contracts::{
    Contract, FinishedNeverRegress, GameNotEnded, PlayersTurn, RollContract, SelectContract,
    TokenSelectable,
};

// Crate-level exports - Collaborators
pub use dice::{DiceSource, RandomDice, ScriptedDice};
pub use scoreboard::{Scoreboard, WinRecorder};

// Crate-level exports - Configuration and errors
pub use config::GameConfig;
pub use error::{ConfigError, DiceError, SetupError, TurnError};
