//! Capture resolution on landing.

use crate::path::{self, Landing};
use crate::player::Player;
use crate::types::{Cell, Color, TokenId};
use tracing::{info, instrument};

/// Returns the opposing tokens a `mover` landing on `cell` would capture.
///
/// Empty on safe cells. Stacked opponents on an unsafe cell are all returned.
#[instrument(skip(players))]
pub fn captures_at(players: &[Player], cell: Cell, mover: Color) -> Vec<TokenId> {
    if path::is_safe(cell) {
        return Vec::new();
    }
    players
        .iter()
        .filter(|p| p.color() != mover)
        .flat_map(|p| p.tokens().iter())
        .filter(|t| t.cell() == Some(cell))
        .map(|t| t.id())
        .collect()
}

/// Evicts every opposing token at the landing cell back to base.
///
/// Only shared-track landings can capture; home stretches are private to
/// their color. Returns the evicted tokens.
#[instrument(skip(players))]
pub(crate) fn resolve_capture(players: &mut [Player], landing: Landing, mover: Color) -> Vec<TokenId> {
    let Landing::Track { cell, .. } = landing else {
        return Vec::new();
    };
    let captured = captures_at(players, cell, mover);
    for id in &captured {
        if let Some(token) = players
            .get_mut(id.player.index())
            .and_then(|p| p.token_mut(*id))
        {
            token.send_to_base();
        }
    }
    if !captured.is_empty() {
        info!(%cell, count = captured.len(), "Tokens captured");
    }
    captured
}
