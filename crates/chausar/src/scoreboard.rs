//! Win tallies across games.
//!
//! The engine reports each winner exactly once through [`WinRecorder`]. Where
//! the tally is stored between runs is up to the host.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument, warn};

/// Receives the winner's name when a game ends.
pub trait WinRecorder: Send {
    /// Records one win.
    fn record_win(&mut self, name: &str);
}

/// In-memory win counts keyed by player name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    wins: BTreeMap<String, u32>,
}

impl Scoreboard {
    /// Creates an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the wins recorded for `name`.
    pub fn wins(&self, name: &str) -> u32 {
        self.wins.get(name).copied().unwrap_or(0)
    }

    /// Returns the total number of recorded games.
    pub fn games_recorded(&self) -> u32 {
        self.wins.values().sum()
    }

    /// Returns `(name, wins)` pairs, most wins first, ties by name.
    pub fn standings(&self) -> Vec<(String, u32)> {
        let mut standings: Vec<_> = self
            .wins
            .iter()
            .map(|(name, wins)| (name.clone(), *wins))
            .collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        standings
    }

    /// Returns true if no wins are recorded.
    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }

    /// Deletes all win records.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(cleared = self.wins.len(), "Scoreboard reset");
        self.wins.clear();
    }
}

impl WinRecorder for Scoreboard {
    #[instrument(skip(self))]
    fn record_win(&mut self, name: &str) {
        let wins = self.wins.entry(name.to_string()).or_insert(0);
        *wins += 1;
        info!(name, wins = *wins, "Win recorded");
    }
}

impl WinRecorder for Arc<Mutex<Scoreboard>> {
    fn record_win(&mut self, name: &str) {
        match self.lock() {
            Ok(mut board) => board.record_win(name),
            Err(_) => warn!(name, "Scoreboard lock poisoned; win not recorded"),
        }
    }
}
