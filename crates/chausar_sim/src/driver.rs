//! Plays one game to the end with a fixed selection policy.

use anyhow::{Result, bail};
use chausar::{GameSession, PlayerId, RollOutcome, TokenId};
use tracing::{debug, instrument};

/// How a finished game went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    /// Winning seat.
    pub winner: PlayerId,
    /// Winner's name.
    pub name: String,
    /// Dice rolls taken.
    pub rolls: usize,
    /// Opponent tokens sent home.
    pub captures: usize,
}

/// Picks the legal token with the lowest slot.
fn choose(legal: &[TokenId]) -> Option<TokenId> {
    legal.iter().min_by_key(|t| t.slot).copied()
}

/// Rolls and moves for whoever is up until someone wins.
///
/// # Errors
///
/// Fails if the engine rejects a call or the game runs past `max_rolls`.
#[instrument(skip(game))]
pub fn play_to_end(game: &mut GameSession, max_rolls: usize) -> Result<GameSummary> {
    let mut rolls = 0;
    let mut captures = 0;

    while game.winner().is_none() {
        if rolls >= max_rolls {
            bail!("No winner after {} rolls", max_rolls);
        }
        let player = game.current_player();
        rolls += 1;
        match game.roll(player)? {
            RollOutcome::NoLegalMove { face, next } => {
                debug!(%player, %face, %next, "Nothing to move");
            }
            RollOutcome::MustSelect { legal, .. } => {
                let Some(token) = choose(&legal) else {
                    bail!("Engine offered an empty move list to {}", player);
                };
                let moved = game.select_token(player, token)?;
                captures += moved.captured.len();
            }
        }
    }

    let Some(winner) = game.winner() else {
        bail!("Game loop exited without a winner");
    };
    let name = game
        .state()
        .player(winner)
        .map(|p| p.name().to_string())
        .unwrap_or_default();
    Ok(GameSummary {
        winner,
        name,
        rolls,
        captures,
    })
}
