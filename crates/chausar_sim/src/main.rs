//! Chausar Sim - headless driver
//!
//! Plays seeded games through the public engine API and reports who won.

#![warn(missing_docs)]

mod cli;
mod driver;

use anyhow::{Context, Result};
use chausar::{FnSink, GameConfig, GameEvent, RandomDice, Scoreboard};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,chausar=warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            games,
            players,
            seed,
            config,
            max_rolls,
        } => run_simulation(games, players, seed, config, max_rolls),
        Command::Replay { players, seed } => run_replay(players, seed),
    }
}

/// Loads the config file if given, then applies command-line overrides.
fn load_config(
    path: Option<PathBuf>,
    players: Option<usize>,
    seed: Option<u64>,
) -> Result<GameConfig> {
    let base = match path {
        Some(path) => {
            let loaded = match players {
                // Seat count comes from the flag and is validated below
                Some(_) => GameConfig::from_file(&path),
                None => GameConfig::load(&path),
            };
            loaded.with_context(|| format!("loading {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    let mut config = match players {
        Some(count) => {
            let names = base.names().iter().take(count).cloned().collect();
            GameConfig::new(count, names)
        }
        None => base.clone(),
    };
    if let Some(seed) = seed.or(*base.seed()) {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Plays `games` games and prints the standings.
#[instrument(skip(config))]
fn run_simulation(
    games: u32,
    players: Option<usize>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    max_rolls: usize,
) -> Result<()> {
    let config = load_config(config, players, seed)?;
    let board = Arc::new(Mutex::new(Scoreboard::new()));
    let mut total_rolls = 0;
    let mut total_captures = 0;

    info!(games, players = config.player_count(), "Starting simulation");

    for n in 0..games {
        let mut game = match config.seed() {
            Some(seed) => config
                .clone()
                .into_session_with(RandomDice::seeded(seed.wrapping_add(u64::from(n))))?,
            None => config.clone().into_session()?,
        };
        game.record_wins_to(Arc::clone(&board));

        match driver::play_to_end(&mut game, max_rolls) {
            Ok(summary) => {
                info!(
                    game = n + 1,
                    winner = %summary.name,
                    rolls = summary.rolls,
                    captures = summary.captures,
                    "Game finished"
                );
                total_rolls += summary.rolls;
                total_captures += summary.captures;
            }
            Err(e) => warn!(game = n + 1, error = %e, "Game abandoned"),
        }
    }

    let board = board
        .lock()
        .map_err(|_| anyhow::anyhow!("Scoreboard lock poisoned"))?;
    println!("Standings after {} games:", board.games_recorded());
    for (name, wins) in board.standings() {
        println!("  {:<12} {:>4}", name, wins);
    }
    println!("Rolls: {}  Captures: {}", total_rolls, total_captures);
    Ok(())
}

/// Plays one seeded game and prints each event as it is committed.
#[instrument]
fn run_replay(players: usize, seed: u64) -> Result<()> {
    let mut game = GameConfig::new(players, Vec::new())
        .with_seed(seed)
        .into_session()?;
    game.subscribe(FnSink(|event: &GameEvent| match event {
        GameEvent::Rolled { .. } => println!("{}", event),
        _ => println!("    {}", event),
    }));

    let summary = driver::play_to_end(&mut game, 100_000)?;
    println!(
        "{} wins after {} rolls ({} captures)",
        summary.name, summary.rolls, summary.captures
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_players_flag_trims_configured_names() {
        let file = config_file("player_count = 4\nnames = [\"A\", \"B\", \"C\", \"D\"]");
        let config = load_config(Some(file.path().to_path_buf()), Some(2), Some(1)).unwrap();
        assert_eq!(*config.player_count(), 2);
        assert_eq!(config.names(), &vec!["A".to_string(), "B".to_string()]);
        assert_eq!(*config.seed(), Some(1));
    }

    #[test]
    fn test_players_flag_fills_missing_names() {
        let file = config_file("player_count = 2\nnames = [\"A\", \"B\"]\nseed = 8");
        let config = load_config(Some(file.path().to_path_buf()), Some(3), None).unwrap();
        assert_eq!(config.resolved_names(), vec!["A", "B", "Player 3"]);
        assert_eq!(*config.seed(), Some(8));
    }

    #[test]
    fn test_file_used_as_is_without_overrides() {
        let file = config_file("player_count = 3\nseed = 4");
        let config = load_config(Some(file.path().to_path_buf()), None, None).unwrap();
        assert_eq!(*config.player_count(), 3);
        assert_eq!(*config.seed(), Some(4));
    }

    #[test]
    fn test_invalid_override_rejected() {
        assert!(load_config(None, Some(5), None).is_err());
        let file = config_file("player_count = 6");
        assert!(load_config(Some(file.path().to_path_buf()), None, None).is_err());
    }
}
