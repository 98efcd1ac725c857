//! Token position invariant: a token on the board is somewhere on its path.

use super::Invariant;
use crate::path::FINISH_STEP;
use crate::state::GameState;
use crate::token::TokenState;

/// Invariant: every on-board token stands strictly before the finish step,
/// and carries its owner's color.
///
/// Base and finished tokens have no position by construction.
pub struct TokenPositionInvariant;

impl Invariant<GameState> for TokenPositionInvariant {
    fn holds(state: &GameState) -> bool {
        state.players().iter().all(|player| {
            player.tokens().iter().all(|token| {
                let on_path = match token.state() {
                    TokenState::OnTrack { step } => step < FINISH_STEP,
                    TokenState::Base | TokenState::Finished => token.position().is_none(),
                };
                on_path && token.color() == player.color()
            })
        })
    }

    fn description() -> &'static str {
        "On-board tokens stand before the finish; base and finished tokens have no position"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::types::{PlayerId, TokenId};
    use crate::GameSession;

    #[test]
    fn test_fresh_game_holds() {
        let game = GameSession::new_game(4, &["A", "B", "C", "D"], ScriptedDice::new(&[1]).unwrap())
            .unwrap();
        assert!(TokenPositionInvariant::holds(game.state()));
    }

    #[test]
    fn test_finished_token_holds() {
        let mut state = GameSession::new_game(2, &["A", "B"], ScriptedDice::new(&[1]).unwrap())
            .unwrap()
            .state()
            .clone();
        let id = TokenId::new(PlayerId(0), 0);
        state.players_mut()[0].token_mut(id).unwrap().place_at(55);
        assert!(TokenPositionInvariant::holds(&state));
        state.players_mut()[0].token_mut(id).unwrap().place_at(56);
        assert!(TokenPositionInvariant::holds(&state));
    }
}
