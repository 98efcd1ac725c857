//! Token count invariant: every seat owns exactly its four tokens.

use super::Invariant;
use crate::state::GameState;
use crate::types::TOKENS_PER_PLAYER;

/// Invariant: seat `i` is player `i`, and its tokens are slots `0..4` owned by
/// that seat. The Base / OnTrack / Finished counts therefore always sum to
/// four per player.
pub struct TokenCountInvariant;

impl Invariant<GameState> for TokenCountInvariant {
    fn holds(state: &GameState) -> bool {
        state.players().iter().enumerate().all(|(seat, player)| {
            let seat_matches = player.id().index() == seat;
            let tokens_match = player.tokens().iter().enumerate().all(|(slot, token)| {
                token.id().player == player.id() && usize::from(token.id().slot) == slot
            });
            let on_track = player
                .tokens()
                .iter()
                .filter(|t| t.position().is_some())
                .count();
            let partitioned =
                player.tokens_in_base() + on_track + player.tokens_finished() == TOKENS_PER_PLAYER;
            seat_matches && tokens_match && partitioned
        })
    }

    fn description() -> &'static str {
        "Each seat owns exactly four tokens, partitioned across base, track and finish"
    }
}
