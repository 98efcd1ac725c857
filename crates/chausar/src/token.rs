//! Token state machine.
//!
//! A token starts in `Base`, enters the track on a six, walks its color's path
//! and becomes `Finished` on an exact count to the finish step. `Finished` is
//! terminal. Capture is the only transition back to `Base`.

use crate::error::TurnError;
use crate::path::{self, FINISH_STEP, Landing};
use crate::types::{Cell, Color, DieFace, TokenId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where a token is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TokenState {
    /// Waiting in the owner's base for a six.
    Base,
    /// On the board, `step` color-relative steps past the entry cell.
    OnTrack {
        /// Progress in `0..FINISH_STEP`.
        step: u8,
    },
    /// Reached the finish. Never moves again.
    Finished,
}

/// A single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    id: TokenId,
    color: Color,
    state: TokenState,
}

impl Token {
    /// Creates a token sitting in base.
    pub fn new(id: TokenId, color: Color) -> Self {
        Self {
            id,
            color,
            state: TokenState::Base,
        }
    }

    /// Returns the token id.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Returns the owner's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> TokenState {
        self.state
    }

    /// Returns the color-relative step while on the board.
    pub fn position(&self) -> Option<u8> {
        match self.state {
            TokenState::OnTrack { step } => Some(step),
            TokenState::Base | TokenState::Finished => None,
        }
    }

    /// Returns the board cell the token stands on, if any.
    pub fn cell(&self) -> Option<Cell> {
        self.position().and_then(|step| path::cell_at(self.color, step))
    }

    /// Returns where the token currently stands on the path.
    pub fn landing(&self) -> Option<Landing> {
        self.position().map(|step| path::landing(self.color, step))
    }

    /// Returns true while the token waits in base.
    pub fn is_in_base(&self) -> bool {
        self.state == TokenState::Base
    }

    /// Returns true once the token has finished.
    pub fn is_finished(&self) -> bool {
        self.state == TokenState::Finished
    }

    /// A token in base may enter the track only on a six.
    pub fn can_leave_base(&self, roll: DieFace) -> bool {
        self.is_in_base() && roll.is_six()
    }

    /// A token on the board may advance only if it does not overshoot the finish.
    pub fn can_advance(&self, roll: DieFace) -> bool {
        self.position()
            .is_some_and(|step| step + roll.value() <= FINISH_STEP)
    }

    /// Returns true if the token has any legal move for `roll`.
    pub fn can_move(&self, roll: DieFace) -> bool {
        self.can_leave_base(roll) || self.can_advance(roll)
    }

    /// Moves the token from base onto its color's entry cell.
    ///
    /// # Errors
    ///
    /// Returns `TurnError::TokenNotSelectable` if the token is not in base.
    #[instrument(skip(self), fields(token = %self.id))]
    pub(crate) fn leave_base(&mut self) -> Result<Landing, TurnError> {
        if !self.is_in_base() {
            return Err(TurnError::TokenNotSelectable(self.id));
        }
        self.state = TokenState::OnTrack { step: 0 };
        let landing = path::landing(self.color, 0);
        debug!(?landing, "Token entered the track");
        Ok(landing)
    }

    /// Advances the token by `roll` steps.
    ///
    /// Landing exactly on the finish step moves the token to `Finished`.
    ///
    /// # Errors
    ///
    /// Returns `TurnError::TokenNotSelectable` if the token is not on the board
    /// or the move would overshoot the finish; the token is left untouched.
    #[instrument(skip(self), fields(token = %self.id, roll = %roll))]
    pub(crate) fn advance(&mut self, roll: DieFace) -> Result<Landing, TurnError> {
        let Some(step) = self.position().filter(|_| self.can_advance(roll)) else {
            return Err(TurnError::TokenNotSelectable(self.id));
        };
        let next = step + roll.value();
        self.state = if next == FINISH_STEP {
            TokenState::Finished
        } else {
            TokenState::OnTrack { step: next }
        };
        let landing = path::landing(self.color, next);
        debug!(from = step, to = next, ?landing, "Token advanced");
        Ok(landing)
    }

    /// Sends a captured token back to base.
    pub(crate) fn send_to_base(&mut self) {
        self.state = TokenState::Base;
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, step: u8) {
        self.state = if step >= FINISH_STEP {
            TokenState::Finished
        } else {
            TokenState::OnTrack { step }
        };
    }
}
