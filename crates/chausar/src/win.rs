//! Win detection.

use crate::player::Player;
use tracing::instrument;

/// Returns true once every token the player owns has finished.
#[instrument(skip(player), fields(player = %player.id()))]
pub fn has_won(player: &Player) -> bool {
    player.tokens().iter().all(|t| t.is_finished())
}

/// Returns the first player who has won, if any.
pub fn find_winner(players: &[Player]) -> Option<&Player> {
    players.iter().find(|p| has_won(p))
}
