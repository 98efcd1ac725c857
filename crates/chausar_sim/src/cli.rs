//! Command-line interface for chausar_sim.

use clap::{Parser, Subcommand};

/// Chausar Sim - Headless driver for the Chausar rules engine
#[derive(Parser, Debug)]
#[command(name = "chausar_sim")]
#[command(about = "Plays Chausar games without a board and tallies the winners", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a batch of games and print the standings
    Simulate {
        /// Number of games to play
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Seats per game (2-4). Overrides the config file.
        #[arg(short, long)]
        players: Option<usize>,

        /// Base dice seed; game N uses seed + N. Overrides the config file.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to a game config TOML file
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Give up on a game after this many dice rolls
        #[arg(long, default_value = "100000")]
        max_rolls: usize,
    },

    /// Play a single game and print every event
    Replay {
        /// Seats in the game (2-4)
        #[arg(short, long, default_value = "4")]
        players: usize,

        /// Dice seed
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
}
