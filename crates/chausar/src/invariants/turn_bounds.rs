//! Turn bounds invariant: the turn always belongs to a seated player, and
//! the phase agrees with the board.

use super::Invariant;
use crate::phases::TurnPhase;
use crate::state::GameState;
use crate::types::{MAX_PLAYERS, MIN_PLAYERS};
use crate::win;

/// Invariant: the seat count is 2-4 and the current seat exists.
///
/// `Ended` names a seat whose four tokens are finished, and no one has won
/// while play continues. `AwaitingMoveSelection` only occurs when the
/// current player has something to move.
pub struct TurnBoundsInvariant;

impl Invariant<GameState> for TurnBoundsInvariant {
    fn holds(state: &GameState) -> bool {
        let seats_ok = (MIN_PLAYERS..=MAX_PLAYERS).contains(&state.player_count());
        let current_ok = state.current().index() < state.player_count();
        let phase_ok = match state.phase() {
            TurnPhase::Ended { winner } => state.player(winner).is_some_and(win::has_won),
            TurnPhase::AwaitingRoll => win::find_winner(state.players()).is_none(),
            TurnPhase::AwaitingMoveSelection { .. } => {
                win::find_winner(state.players()).is_none() && !state.legal_tokens().is_empty()
            }
        };
        seats_ok && current_ok && phase_ok
    }

    fn description() -> &'static str {
        "Turn belongs to a seated player and the phase matches the board"
    }
}
